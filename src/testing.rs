//! Test doubles shared by the unit tests: a scripted HTTP backend on a local port and
//! an in-memory [`DesignBackend`].

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::backend::DesignBackend;
use crate::config::BackendConfig;
use crate::models::{
    ActionResult, ChatReply, ChatRequest, EditDesignRequest, EditedDesign, GeneratedPrompt,
    GenerationRequest, GenerationResult, PromptRequest, SuggestEditsRequest, Suggestion,
};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }
}

pub struct FakeBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[derive(Clone)]
struct ServerState {
    responses: Arc<Vec<CannedResponse>>,
    served: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeBackend {
    /// Answers requests with `responses` in order; the last one repeats once the script runs out.
    pub async fn start(responses: Vec<CannedResponse>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            responses: Arc::new(responses),
            served: Arc::new(AtomicUsize::new(0)),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn config(&self) -> BackendConfig {
        BackendConfig::new().with_base_url(self.base_url.clone())
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: body.to_vec(),
    });

    let index = state.served.fetch_add(1, Ordering::SeqCst);
    let response = state
        .responses
        .get(index)
        .or_else(|| state.responses.last())
        .cloned()
        .unwrap_or_else(|| CannedResponse::new(404, "no script"));
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], response.body)
}

/// A base URL nothing listens on.
pub async fn unreachable_config() -> BackendConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BackendConfig::new().with_base_url(format!("http://{}", addr))
}

/// In-memory [`DesignBackend`] answering from per-action scripts, with optional delays.
#[derive(Default)]
pub struct ScriptedBackend {
    generations: Mutex<VecDeque<(Duration, ActionResult<GenerationResult>)>>,
    edits: Mutex<VecDeque<(Duration, ActionResult<EditedDesign>)>>,
    replies: Mutex<VecDeque<ActionResult<ChatReply>>>,
    suggestions: Mutex<VecDeque<ActionResult<Suggestion>>>,
    prompts: Mutex<VecDeque<ActionResult<GeneratedPrompt>>>,
    pub generation_requests: Mutex<Vec<GenerationRequest>>,
    pub edit_requests: Mutex<Vec<EditDesignRequest>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub suggest_requests: Mutex<Vec<SuggestEditsRequest>>,
    pub prompt_requests: Mutex<Vec<PromptRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(urls: &[&str]) -> ActionResult<GenerationResult> {
        ActionResult::success(GenerationResult {
            data: urls.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        })
    }

    pub fn push_generation(&self, result: ActionResult<GenerationResult>) -> &Self {
        self.push_delayed_generation(Duration::ZERO, result)
    }

    pub fn push_delayed_generation(&self, delay: Duration, result: ActionResult<GenerationResult>) -> &Self {
        self.generations.lock().unwrap().push_back((delay, result));
        self
    }

    pub fn push_edit(&self, result: ActionResult<EditedDesign>) -> &Self {
        self.push_delayed_edit(Duration::ZERO, result)
    }

    pub fn push_delayed_edit(&self, delay: Duration, result: ActionResult<EditedDesign>) -> &Self {
        self.edits.lock().unwrap().push_back((delay, result));
        self
    }

    pub fn push_reply(&self, result: ActionResult<ChatReply>) -> &Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub fn push_suggestion(&self, result: ActionResult<Suggestion>) -> &Self {
        self.suggestions.lock().unwrap().push_back(result);
        self
    }

    pub fn push_prompt(&self, result: ActionResult<GeneratedPrompt>) -> &Self {
        self.prompts.lock().unwrap().push_back(result);
        self
    }

    pub fn generation_calls(&self) -> usize {
        self.generation_requests.lock().unwrap().len()
    }
}

fn unscripted<T>() -> ActionResult<T> {
    ActionResult::failure("no scripted response")
}

#[async_trait]
impl DesignBackend for ScriptedBackend {
    async fn generate_design(&self, request: GenerationRequest) -> ActionResult<GenerationResult> {
        self.generation_requests.lock().unwrap().push(request);
        let next = self.generations.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => unscripted(),
        }
    }

    async fn edit_design(&self, request: EditDesignRequest) -> ActionResult<EditedDesign> {
        self.edit_requests.lock().unwrap().push(request);
        let next = self.edits.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => unscripted(),
        }
    }

    async fn chat(&self, request: ChatRequest) -> ActionResult<ChatReply> {
        self.chat_requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(unscripted)
    }

    async fn suggest_edits(&self, request: SuggestEditsRequest) -> ActionResult<Suggestion> {
        self.suggest_requests.lock().unwrap().push(request);
        let next = self.suggestions.lock().unwrap().pop_front();
        next.unwrap_or_else(unscripted)
    }

    async fn generate_prompt(&self, request: PromptRequest) -> ActionResult<GeneratedPrompt> {
        self.prompt_requests.lock().unwrap().push(request);
        let next = self.prompts.lock().unwrap().pop_front();
        next.unwrap_or_else(unscripted)
    }
}
