use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Missing fields: {0}")]
    Validation(String),
    /// A field is present but unusable, such as a non-image file or an out-of-range selection.
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Backend request failed with status {status}: {body}")]
    Backend { status: u16, body: String },
    /// A backend action reported failure; the message is passed through unchanged.
    #[error("{0}")]
    Action(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("File error: {0}")]
    Io(String),
    #[error("{0}")]
    Unknown(String),
}

/// Coarse classification surfaced to whoever renders a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was missing or unusable; no request was made.
    Validation,
    /// Network failure, non-2xx status or an unparseable body. Retrying the action is safe.
    Transport,
    Unknown,
}

impl DesignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DesignError::Validation(_) | DesignError::Invalid(_) => ErrorKind::Validation,
            DesignError::Request(_)
            | DesignError::Backend { .. }
            | DesignError::Action(_)
            | DesignError::Response(_)
            | DesignError::Serialization(_) => ErrorKind::Transport,
            DesignError::Config(_) | DesignError::Io(_) | DesignError::Unknown(_) => {
                ErrorKind::Unknown
            }
        }
    }
}

impl From<reqwest::Error> for DesignError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DesignError::Response(e.to_string())
        } else {
            DesignError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(e: serde_json::Error) -> Self {
        DesignError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for DesignError {
    fn from(e: std::io::Error) -> Self {
        DesignError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
