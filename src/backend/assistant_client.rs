use crate::{
    backend::{endpoints, rpc::RpcClient},
    models::{
        ActionResult, ChatReply, ChatRequest, GeneratedPrompt, PromptRequest, Recommendations,
        SuggestEditsRequest, Suggestion,
    },
};

/// Text-only actions: the design chat, edit suggestions, prompt ideas and style summaries.
#[derive(Clone)]
pub struct AssistantActions {
    rpc: RpcClient,
}

impl AssistantActions {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn chat(&self, request: ChatRequest) -> ActionResult<ChatReply> {
        log::debug!("Sending chat query ({} chars)", request.query.len());
        self.rpc.post_json(endpoints::CHAT, &request).await
    }

    pub async fn suggest_edits(&self, request: SuggestEditsRequest) -> ActionResult<Suggestion> {
        self.rpc.post_json(endpoints::SUGGEST_EDITS, &request).await
    }

    pub async fn generate_prompt(&self, request: PromptRequest) -> ActionResult<GeneratedPrompt> {
        self.rpc.post_json(endpoints::GENERATE_NEW_PROMPT, &request).await
    }

    /// `style` may list several styles separated by commas.
    pub async fn recommendations(&self, style: &str) -> ActionResult<Recommendations> {
        self.rpc.get_json(endpoints::RECOMMENDATIONS, &[style]).await
    }
}
