use crate::datauri::DataUri;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Text,
    Image,
    FloorPlan,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Text => "text",
            GenerationMode::Image => "image",
            GenerationMode::FloorPlan => "floorplan",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(GenerationMode::Text),
            "image" => Ok(GenerationMode::Image),
            "floorplan" | "floor-plan" | "floor_plan" => Ok(GenerationMode::FloorPlan),
            other => Err(format!("unknown generation mode: {}", other)),
        }
    }
}

/// One `/generate-design` submission. Each mode carries exactly the inputs it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Text {
        prompt: String,
        style: String,
    },
    Image {
        prompt: String,
        style: String,
        base_image: DataUri,
    },
    FloorPlan {
        style: String,
        floor_plan: DataUri,
        prompt: Option<String>,
    },
}

impl GenerationRequest {
    pub fn mode(&self) -> GenerationMode {
        match self {
            GenerationRequest::Text { .. } => GenerationMode::Text,
            GenerationRequest::Image { .. } => GenerationMode::Image,
            GenerationRequest::FloorPlan { .. } => GenerationMode::FloorPlan,
        }
    }

    pub fn style(&self) -> &str {
        match self {
            GenerationRequest::Text { style, .. }
            | GenerationRequest::Image { style, .. }
            | GenerationRequest::FloorPlan { style, .. } => style,
        }
    }
}

/// Sent as `style` when an image-mode request has no style.
pub const UNSPECIFIED_STYLE: &str = "No specific style";

// Flat form shape expected by the backend. Fields that do not apply stay `null`
// and are dropped by the multipart encoder. `prompt` and `style` are required form
// fields and the backend rejects empty values for them with a 422.
#[derive(Serialize)]
struct DesignForm<'a> {
    prompt: Cow<'a, str>,
    style: &'a str,
    mode: GenerationMode,
    #[serde(rename = "baseImage")]
    base_image: Option<&'a DataUri>,
    #[serde(rename = "floorPlan")]
    floor_plan: Option<&'a DataUri>,
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.trim().is_empty())
}

impl Serialize for GenerationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let form = match self {
            GenerationRequest::Text { prompt, style } => DesignForm {
                prompt: Cow::Borrowed(prompt),
                style,
                mode: GenerationMode::Text,
                base_image: None,
                floor_plan: None,
            },
            GenerationRequest::Image {
                prompt,
                style,
                base_image,
            } => DesignForm {
                prompt: Cow::Borrowed(prompt),
                style: non_blank(style).unwrap_or(UNSPECIFIED_STYLE),
                mode: GenerationMode::Image,
                base_image: Some(base_image),
                floor_plan: None,
            },
            GenerationRequest::FloorPlan {
                style,
                floor_plan,
                prompt,
            } => DesignForm {
                prompt: match prompt.as_deref().and_then(non_blank) {
                    Some(prompt) => Cow::Borrowed(prompt),
                    None => Cow::Owned(format!("{} interior laid out from the floor plan", style)),
                },
                style,
                mode: GenerationMode::FloorPlan,
                base_image: None,
                floor_plan: Some(floor_plan),
            },
        };
        form.serialize(serializer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerationResult {
    pub data: Vec<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub final_prompt: Option<String>,
    #[serde(default)]
    pub image_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditDesignRequest {
    pub base_image: String,
    pub edit_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditedDesign {
    pub edited_images: Vec<String>,
}
