use crate::{
    backend::{endpoints, rpc::RpcClient},
    models::{ActionResult, EditDesignRequest, EditedDesign, GenerationRequest, GenerationResult},
};

#[derive(Clone)]
pub struct DesignActions {
    rpc: RpcClient,
}

impl DesignActions {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// Sent as multipart form data, unlike every other action.
    pub async fn generate_design(&self, request: GenerationRequest) -> ActionResult<GenerationResult> {
        log::info!(
            "Generating {} design in '{}' style",
            request.mode(),
            request.style()
        );
        self.rpc.post_form(endpoints::GENERATE_DESIGN, &request).await
    }

    pub async fn edit_design(&self, request: EditDesignRequest) -> ActionResult<EditedDesign> {
        log::info!("Editing design: {}", request.edit_prompt);
        self.rpc.post_json(endpoints::EDIT_DESIGN_WITH_TEXT, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datauri::DataUri;
    use crate::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    #[tokio::test]
    async fn image_generation_posts_base_image_field() {
        let server = FakeBackend::start(vec![CannedResponse::json(json!({
            "data": ["data:image/png;base64,AAAA", "data:image/png;base64,BBBB"],
            "prompt": "bright kitchen",
            "final_prompt": "",
            "image_ids": ["a", "b"],
        }))])
        .await;
        let actions = DesignActions::new(RpcClient::new(&server.config()).unwrap());

        let photo = DataUri::from_bytes("image/jpeg", b"photo");
        let result = actions
            .generate_design(GenerationRequest::Image {
                prompt: "bright kitchen".into(),
                style: "Modern".into(),
                base_image: photo.clone(),
            })
            .await;

        let data = result.data().expect("generation should succeed");
        assert_eq!(data.data.len(), 2);
        assert_eq!(data.image_ids.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));

        let request = &server.requests()[0];
        assert_eq!(request.path, "/generate-design");
        let body = request.body_text();
        assert!(body.contains("name=\"baseImage\""));
        assert!(body.contains(photo.as_str()));
        assert!(!body.contains("name=\"floorPlan\""));
    }

    #[tokio::test]
    async fn edit_posts_json_to_edit_flow() {
        let server = FakeBackend::start(vec![CannedResponse::json(json!({
            "editedImages": ["data:image/png;base64,EDIT"]
        }))])
        .await;
        let actions = DesignActions::new(RpcClient::new(&server.config()).unwrap());

        let result = actions
            .edit_design(EditDesignRequest {
                base_image: "data:image/png;base64,AAAA".into(),
                edit_prompt: "make the sofa blue".into(),
                design_style: Some("Coastal".into()),
            })
            .await;
        assert_eq!(
            result.data().map(|d| d.edited_images.clone()),
            Some(vec!["data:image/png;base64,EDIT".to_string()])
        );

        let request = &server.requests()[0];
        assert_eq!(request.path, "/flow/edit-interior-design-with-text");
        assert_eq!(
            request.body_json(),
            json!({
                "baseImage": "data:image/png;base64,AAAA",
                "editPrompt": "make the sofa blue",
                "designStyle": "Coastal",
            })
        );
    }

    #[tokio::test]
    async fn identical_calls_are_not_deduplicated() {
        let server = FakeBackend::start(vec![CannedResponse::json(json!({"data": ["x"]}))]).await;
        let actions = DesignActions::new(RpcClient::new(&server.config()).unwrap());
        let request = GenerationRequest::Text {
            prompt: "reading nook".into(),
            style: "Bohemian".into(),
        };

        let (first, second) = futures::join!(
            actions.generate_design(request.clone()),
            actions.generate_design(request.clone())
        );
        assert_eq!(first, second);
        assert!(first.is_success());

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, requests[1].path);
    }
}
