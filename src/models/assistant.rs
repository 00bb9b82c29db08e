use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuggestEditsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PromptRequest {
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// `/generate-new-prompt` also echoes `success`; only `data` is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPrompt {
    pub data: String,
}

/// Style summaries from `/get-recommendations/{style}`, one per comma-separated style.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Recommendations {
    #[serde(default)]
    pub data: Vec<String>,
}
