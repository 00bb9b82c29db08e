use crate::{
    datauri::{image_mime_for_path, DataUri},
    error::{DesignError, Result},
    models::{GenerationMode, GenerationRequest},
    studio::state::StudioState,
};
use std::path::PathBuf;

/// A validated submission whose files have not been read yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GenerationDraft {
    Text {
        prompt: String,
        style: String,
    },
    Image {
        prompt: String,
        style: String,
        source: PathBuf,
    },
    FloorPlan {
        style: String,
        plan: PathBuf,
        prompt: Option<String>,
    },
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl GenerationDraft {
    pub(crate) fn from_state(state: &StudioState) -> Result<Self> {
        let prompt = non_empty(&state.prompt);
        let style = non_empty(&state.style);
        let mut missing = Vec::new();

        let draft = match state.mode {
            GenerationMode::Text => {
                if prompt.is_none() {
                    missing.push("prompt");
                }
                if style.is_none() {
                    missing.push("style");
                }
                prompt.zip(style).map(|(prompt, style)| GenerationDraft::Text { prompt, style })
            }
            GenerationMode::Image => {
                if state.source_file.is_none() {
                    missing.push("source image");
                }
                if prompt.is_none() {
                    missing.push("prompt");
                }
                state
                    .source_file
                    .clone()
                    .zip(prompt)
                    .map(|(source, prompt)| GenerationDraft::Image {
                        prompt,
                        style: style.unwrap_or_default(),
                        source,
                    })
            }
            GenerationMode::FloorPlan => {
                if state.floor_plan_file.is_none() {
                    missing.push("floor plan");
                }
                if style.is_none() {
                    missing.push("style");
                }
                state
                    .floor_plan_file
                    .clone()
                    .zip(style)
                    .map(|(plan, style)| GenerationDraft::FloorPlan { style, plan, prompt })
            }
        };

        let draft = draft.ok_or_else(|| DesignError::Validation(missing.join(", ")))?;
        if let Some(file) = draft.file() {
            image_mime_for_path(file)?;
        }
        Ok(draft)
    }

    fn file(&self) -> Option<&PathBuf> {
        match self {
            GenerationDraft::Text { .. } => None,
            GenerationDraft::Image { source, .. } => Some(source),
            GenerationDraft::FloorPlan { plan, .. } => Some(plan),
        }
    }

    /// Reads any selected file into a data URI.
    pub(crate) async fn into_request(self) -> Result<GenerationRequest> {
        Ok(match self {
            GenerationDraft::Text { prompt, style } => GenerationRequest::Text { prompt, style },
            GenerationDraft::Image {
                prompt,
                style,
                source,
            } => GenerationRequest::Image {
                prompt,
                style,
                base_image: DataUri::image_from_file(&source).await?,
            },
            GenerationDraft::FloorPlan { style, plan, prompt } => GenerationRequest::FloorPlan {
                style,
                floor_plan: DataUri::image_from_file(&plan).await?,
                prompt,
            },
        })
    }
}
