pub mod assistant;
pub mod chat;
pub mod common;
#[cfg(feature = "flows")]
pub mod flow;
pub mod generation;
pub mod project;
pub mod result;

pub use assistant::*;
pub use chat::*;
pub use common::*;
#[cfg(feature = "flows")]
pub use flow::*;
pub use generation::*;
pub use project::*;
pub use result::*;
