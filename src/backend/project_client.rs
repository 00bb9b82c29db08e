use crate::{
    backend::{endpoints, rpc::RpcClient},
    models::{ActionResult, Project, SaveProjectRequest, SavedProject},
};

/// Saved projects. The backend keeps them in memory, so they vanish when it restarts.
#[derive(Clone)]
pub struct ProjectActions {
    rpc: RpcClient,
}

impl ProjectActions {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn save_project(&self, request: SaveProjectRequest) -> ActionResult<SavedProject> {
        log::info!("Saving project '{}' for {}", request.project_name, request.user_id);
        self.rpc.post_json(endpoints::SAVE_PROJECT, &request).await
    }

    pub async fn list_projects(&self) -> ActionResult<Vec<Project>> {
        self.rpc.get_json(endpoints::PROJECTS, &[]).await
    }
}
