pub mod assistant_client;
pub mod design_client;
#[cfg(feature = "flows")]
pub mod flow_client;
pub mod project_client;
pub mod rpc;
pub mod traits;

use crate::{
    config::{BackendConfig, Config},
    error::Result,
    models::{
        ActionResult, ChatReply, ChatRequest, EditDesignRequest, EditedDesign, GeneratedPrompt,
        GenerationRequest, GenerationResult, PromptRequest, SuggestEditsRequest, Suggestion,
    },
};
use async_trait::async_trait;

pub use assistant_client::AssistantActions;
pub use design_client::DesignActions;
#[cfg(feature = "flows")]
pub use flow_client::FlowActions;
pub use project_client::ProjectActions;
pub use rpc::{BodyEncoding, RpcClient};
pub use traits::DesignBackend;

pub mod endpoints {
    pub const GENERATE_DESIGN: &str = "/generate-design";
    pub const CHAT: &str = "/chat";
    pub const SUGGEST_EDITS: &str = "/suggest-edits";
    pub const GENERATE_NEW_PROMPT: &str = "/generate-new-prompt";
    pub const RECOMMENDATIONS: &str = "/get-recommendations";
    pub const SAVE_PROJECT: &str = "/save-project";
    pub const PROJECTS: &str = "/projects";
    /// The studio edits through this flow endpoint, so it is available without the `flows` feature.
    pub const EDIT_DESIGN_WITH_TEXT: &str = "/flow/edit-interior-design-with-text";

    #[cfg(feature = "flows")]
    pub mod flow {
        pub const GENERATE_IMAGE_PROMPT: &str = "/flow/generate-image-prompt";
        pub const DESIGN_FROM_PROMPT: &str = "/flow/generate-interior-design-from-prompt";
        pub const SUGGESTIONS_FROM_CHAT: &str = "/flow/get-design-suggestions-from-chat";
        pub const SUMMARIZE_STYLES: &str = "/flow/summarize-design-styles";
        pub const SUGGEST_IMAGE_EDITS: &str = "/flow/suggest-image-edits";
        pub const FROM_CAD_FLOOR_PLAN: &str = "/flow/generate-image-from-cad-floor-plan";
    }
}

#[derive(Clone)]
pub struct DesignClient {
    rpc: RpcClient,
    design_actions: DesignActions,
    assistant_actions: AssistantActions,
    project_actions: ProjectActions,
    #[cfg(feature = "flows")]
    flow_actions: FlowActions,
}

impl DesignClient {
    pub fn new(backend_config: BackendConfig) -> Result<Self> {
        let rpc = RpcClient::new(&backend_config)?;
        log::info!("Design backend client ready for {}", rpc.base_url());

        Ok(Self {
            design_actions: DesignActions::new(rpc.clone()),
            assistant_actions: AssistantActions::new(rpc.clone()),
            project_actions: ProjectActions::new(rpc.clone()),
            #[cfg(feature = "flows")]
            flow_actions: FlowActions::new(rpc.clone()),
            rpc,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend.clone())
    }

    pub fn design(&self) -> &DesignActions {
        &self.design_actions
    }

    pub fn assistant(&self) -> &AssistantActions {
        &self.assistant_actions
    }

    pub fn projects(&self) -> &ProjectActions {
        &self.project_actions
    }

    #[cfg(feature = "flows")]
    pub fn flows(&self) -> &FlowActions {
        &self.flow_actions
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

#[async_trait]
impl DesignBackend for DesignClient {
    async fn generate_design(&self, request: GenerationRequest) -> ActionResult<GenerationResult> {
        self.design_actions.generate_design(request).await
    }

    async fn edit_design(&self, request: EditDesignRequest) -> ActionResult<EditedDesign> {
        self.design_actions.edit_design(request).await
    }

    async fn chat(&self, request: ChatRequest) -> ActionResult<ChatReply> {
        self.assistant_actions.chat(request).await
    }

    async fn suggest_edits(&self, request: SuggestEditsRequest) -> ActionResult<Suggestion> {
        self.assistant_actions.suggest_edits(request).await
    }

    async fn generate_prompt(&self, request: PromptRequest) -> ActionResult<GeneratedPrompt> {
        self.assistant_actions.generate_prompt(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedResponse, FakeBackend};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn client_serves_as_studio_backend() {
        let server = FakeBackend::start(vec![CannedResponse::json(json!({"data": "Use jute."}))]).await;
        let backend: Arc<dyn DesignBackend> = Arc::new(DesignClient::new(server.config()).unwrap());

        let reply = backend
            .chat(ChatRequest {
                query: "Rug material?".into(),
                session_id: None,
            })
            .await;
        assert_eq!(reply.data().map(|r| r.data.as_str()), Some("Use jute."));
        assert_eq!(server.requests()[0].path, "/chat");
    }
}
