//! Session controller behind the design studio: form state, the three generation modes,
//! image edits and the chat assistant.
//!
//! Generation and edit each keep a submission counter. A response is written into the
//! session only if no newer submission of the same kind was made while it was in flight,
//! so the latest click always determines what is displayed.

mod draft;
pub mod state;

use crate::{
    backend::DesignBackend,
    error::{DesignError, Result},
    models::{
        ChatMessage, ChatRequest, EditDesignRequest, GenerationMode, GenerationResult,
        PromptRequest, SuggestEditsRequest,
    },
};
use draft::GenerationDraft;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

pub use state::{Notice, NoticeLevel, Outcome, StudioState};

pub struct Studio {
    backend: Arc<dyn DesignBackend>,
    state: Mutex<StudioState>,
    notices: Mutex<Vec<Notice>>,
    generation_seq: AtomicU64,
    edit_seq: AtomicU64,
    session_id: String,
}

impl Studio {
    pub fn new(backend: Arc<dyn DesignBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(StudioState::default()),
            notices: Mutex::new(Vec::new()),
            generation_seq: AtomicU64::new(0),
            edit_seq: AtomicU64::new(0),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // The guard is never held across an await.
    fn state(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> StudioState {
        self.state().clone()
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        let mut notices = self
            .notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *notices)
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::warn!("{}: {}", notice.title, notice.message),
            NoticeLevel::Info => log::info!("{}: {}", notice.title, notice.message),
        }
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }

    fn reject(&self, error: DesignError) -> DesignError {
        match &error {
            DesignError::Validation(fields) => {
                self.notify(Notice::error("Missing fields", format!("Please provide: {}", fields)))
            }
            DesignError::Invalid(reason) => self.notify(Notice::error("Invalid input", reason.clone())),
            _ => {}
        }
        error
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.state().prompt = prompt.into();
    }

    pub fn set_style(&self, style: impl Into<String>) {
        self.state().style = style.into();
    }

    pub fn set_mode(&self, mode: GenerationMode) {
        self.state().mode = mode;
    }

    pub fn select_source_file(&self, path: Option<PathBuf>) {
        self.state().source_file = path;
    }

    pub fn select_floor_plan(&self, path: Option<PathBuf>) {
        self.state().floor_plan_file = path;
    }

    pub fn select_image(&self, index: usize) -> Result<()> {
        let mut state = self.state();
        if index >= state.image_count() {
            return Err(DesignError::Invalid(format!(
                "image index {} is out of range ({} displayed)",
                index,
                state.image_count()
            )));
        }
        state.selected_index = index;
        Ok(())
    }

    /// Drops the displayed images. Prompt and style are kept.
    pub fn clear(&self) {
        let mut state = self.state();
        state.images = None;
        state.selected_index = 0;
    }

    /// Starts a fresh session; responses still in flight are discarded.
    pub fn reset(&self) {
        self.generation_seq.fetch_add(1, Ordering::SeqCst);
        self.edit_seq.fetch_add(1, Ordering::SeqCst);
        *self.state() = StudioState::default();
        self.take_notices();
    }

    pub async fn generate(&self) -> Result<Outcome<GenerationResult>> {
        let draft = {
            let state = self.state();
            GenerationDraft::from_state(&state)
        };
        let draft = draft.map_err(|e| self.reject(e))?;

        let ticket = self.generation_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().generating = true;

        let outcome = match draft.into_request().await {
            Ok(request) => {
                log::info!("Submitting {} generation #{}", request.mode(), ticket);
                self.backend.generate_design(request).await.into_design_result()
            }
            Err(e) => Err(e),
        };

        let mut state = self.state();
        if self.generation_seq.load(Ordering::SeqCst) != ticket {
            log::debug!("Discarding generation #{}: a newer one was submitted", ticket);
            return Ok(Outcome::Superseded);
        }
        state.generating = false;

        match outcome {
            Ok(result) => {
                log::info!("Generation #{} returned {} image(s)", ticket, result.data.len());
                state.images = Some(result.data.clone());
                state.selected_index = 0;
                state.prompt.clear();
                Ok(Outcome::Applied(result))
            }
            Err(e) => {
                drop(state);
                self.notify(Notice::error("Generation failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// Applies free-text edit instructions to the selected image. On success the edited
    /// image replaces the whole displayed set.
    pub async fn edit(&self, instructions: &str) -> Result<Outcome<String>> {
        let request = {
            let state = self.state();
            let mut missing = Vec::new();
            if state.selected_image().is_none() {
                missing.push("generated image");
            }
            if instructions.trim().is_empty() {
                missing.push("edit instructions");
            }
            if missing.is_empty() {
                Ok(EditDesignRequest {
                    base_image: state.selected_image().unwrap_or_default().to_string(),
                    edit_prompt: instructions.trim().to_string(),
                    design_style: Some(state.style.trim().to_string()).filter(|s| !s.is_empty()),
                })
            } else {
                Err(DesignError::Validation(missing.join(", ")))
            }
        };
        let request = request.map_err(|e| self.reject(e))?;

        let ticket = self.edit_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().editing = true;

        let outcome = self
            .backend
            .edit_design(request)
            .await
            .into_design_result()
            .and_then(|edited| {
                edited
                    .edited_images
                    .into_iter()
                    .next()
                    .ok_or_else(|| DesignError::Response("backend returned no edited image".into()))
            });

        let mut state = self.state();
        if self.edit_seq.load(Ordering::SeqCst) != ticket {
            log::debug!("Discarding edit #{}: a newer one was submitted", ticket);
            return Ok(Outcome::Superseded);
        }
        state.editing = false;

        match outcome {
            Ok(image) => {
                state.images = Some(vec![image.clone()]);
                state.selected_index = 0;
                Ok(Outcome::Applied(image))
            }
            Err(e) => {
                drop(state);
                self.notify(Notice::error("Edit failed", e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn send_chat(&self, query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(self.reject(DesignError::Validation("message".into())));
        }
        self.state().transcript.push(ChatMessage::user(query));

        let reply = self
            .backend
            .chat(ChatRequest {
                query: query.to_string(),
                session_id: Some(self.session_id.clone()),
            })
            .await
            .into_design_result();

        match reply {
            Ok(reply) => {
                self.state()
                    .transcript
                    .push(ChatMessage::assistant(reply.data.clone()));
                Ok(reply.data)
            }
            Err(e) => {
                self.notify(Notice::error("Chat failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// Asks the assistant for an edit idea for the selected image. Session state is unchanged.
    pub async fn suggest_edits(&self) -> Result<String> {
        let request = {
            let state = self.state();
            state.selected_image().map(|image| SuggestEditsRequest {
                base_image: Some(image.to_string()),
                design_style: Some(state.style.trim().to_string()).filter(|s| !s.is_empty()),
            })
        };
        let request = request
            .ok_or_else(|| self.reject(DesignError::Validation("generated image".into())))?;

        match self.backend.suggest_edits(request).await.into_design_result() {
            Ok(suggestion) => Ok(suggestion.data),
            Err(e) => {
                self.notify(Notice::error("Suggestion failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// Fills the prompt field with a backend-written prompt for the current style.
    pub async fn generate_prompt(&self, topic: Option<&str>) -> Result<String> {
        let style = self.state().style.trim().to_string();
        if style.is_empty() {
            return Err(self.reject(DesignError::Validation("style".into())));
        }

        let request = PromptRequest {
            style,
            topic: topic.map(str::trim).filter(|t| !t.is_empty()).map(String::from),
        };
        match self.backend.generate_prompt(request).await.into_design_result() {
            Ok(generated) => {
                let prompt = generated.data.trim().to_string();
                self.state().prompt = prompt.clone();
                Ok(prompt)
            }
            Err(e) => {
                self.notify(Notice::error("Prompt generation failed", e.to_string()));
                Err(e)
            }
        }
    }
}
