//! Legacy `/flow/*` endpoints, kept for compatibility with older backends.

use crate::{
    backend::{endpoints, rpc::RpcClient},
    models::{
        ActionResult, ChatSuggestionRequest, EditDesignRequest, EditedDesign,
        FloorPlanDesignRequest, FloorPlanDesignResponse, ImageEditSuggestionRequest,
        ImagePromptRequest, ImagePromptResponse, PromptDesignRequest, PromptDesignResponse,
        StyleSummaries, SuggestionResponse, SummarizeStylesRequest,
    },
};

#[derive(Clone)]
pub struct FlowActions {
    rpc: RpcClient,
}

impl FlowActions {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn generate_image_prompt(&self, request: ImagePromptRequest) -> ActionResult<ImagePromptResponse> {
        self.rpc.post_json(endpoints::flow::GENERATE_IMAGE_PROMPT, &request).await
    }

    pub async fn generate_design_from_prompt(&self, request: PromptDesignRequest) -> ActionResult<PromptDesignResponse> {
        self.rpc.post_json(endpoints::flow::DESIGN_FROM_PROMPT, &request).await
    }

    pub async fn edit_design_with_text(&self, request: EditDesignRequest) -> ActionResult<EditedDesign> {
        self.rpc.post_json(endpoints::EDIT_DESIGN_WITH_TEXT, &request).await
    }

    pub async fn design_suggestions_from_chat(&self, request: ChatSuggestionRequest) -> ActionResult<SuggestionResponse> {
        self.rpc.post_json(endpoints::flow::SUGGESTIONS_FROM_CHAT, &request).await
    }

    pub async fn summarize_design_styles(&self, request: SummarizeStylesRequest) -> ActionResult<StyleSummaries> {
        self.rpc.post_json(endpoints::flow::SUMMARIZE_STYLES, &request).await
    }

    pub async fn suggest_image_edits(&self, request: ImageEditSuggestionRequest) -> ActionResult<SuggestionResponse> {
        self.rpc.post_json(endpoints::flow::SUGGEST_IMAGE_EDITS, &request).await
    }

    pub async fn generate_from_floor_plan(&self, request: FloorPlanDesignRequest) -> ActionResult<FloorPlanDesignResponse> {
        self.rpc.post_json(endpoints::flow::FROM_CAD_FLOOR_PLAN, &request).await
    }
}
