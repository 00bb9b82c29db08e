use crate::models::{GenerationMode, Transcript};
use serde::Serialize;
use std::path::PathBuf;

/// Everything the studio shows for one session. Nothing here outlives the session.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudioState {
    pub prompt: String,
    pub style: String,
    pub mode: GenerationMode,
    pub source_file: Option<PathBuf>,
    pub floor_plan_file: Option<PathBuf>,
    pub images: Option<Vec<String>>,
    pub selected_index: usize,
    pub generating: bool,
    pub editing: bool,
    pub transcript: Transcript,
}

impl StudioState {
    pub fn selected_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.get(self.selected_index))
            .map(String::as_str)
    }

    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient message for the user, drained by whoever renders the studio.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Whether a finished request was written into the session or dropped because a
/// newer request of the same kind had been submitted meanwhile.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Applied(T),
    Superseded,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Superseded => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}
