//! Request and response shapes of the legacy `/flow/*` endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImagePromptRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePromptResponse {
    pub generated_prompt: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptDesignRequest {
    pub prompt: String,
    pub design_style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptDesignResponse {
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatSuggestionRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeStylesRequest {
    pub design_styles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleSummaries {
    pub summaries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageEditSuggestionRequest {
    pub base_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanDesignRequest {
    pub cad_floor_plan_data_uri: String,
    pub design_style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanDesignResponse {
    pub generated_image_urls: Vec<String>,
}
