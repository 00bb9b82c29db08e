pub mod backend;
pub mod config;
pub mod datauri;
pub mod error;
pub mod logger;
pub mod models;
pub mod studio;

#[cfg(test)]
mod testing;

pub use backend::{DesignBackend, DesignClient, RpcClient};
pub use config::{BackendConfig, Config};
pub use datauri::DataUri;
pub use error::{DesignError, ErrorKind, Result};
pub use models::*;
pub use studio::{Notice, NoticeLevel, Outcome, Studio, StudioState};
