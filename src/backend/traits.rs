use crate::models::{
    ActionResult, ChatReply, ChatRequest, EditDesignRequest, EditedDesign, GeneratedPrompt,
    GenerationRequest, GenerationResult, PromptRequest, SuggestEditsRequest, Suggestion,
};
use async_trait::async_trait;

/// The actions the studio needs from a design backend.
#[async_trait]
pub trait DesignBackend: Send + Sync {
    async fn generate_design(&self, request: GenerationRequest) -> ActionResult<GenerationResult>;
    async fn edit_design(&self, request: EditDesignRequest) -> ActionResult<EditedDesign>;

    async fn chat(&self, request: ChatRequest) -> ActionResult<ChatReply>;
    async fn suggest_edits(&self, request: SuggestEditsRequest) -> ActionResult<Suggestion>;
    async fn generate_prompt(&self, request: PromptRequest) -> ActionResult<GeneratedPrompt>;
}
