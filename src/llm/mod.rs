//! Language-model interpretation of user commands
//!
//! The model only ever sees the rendered process summary and only ever
//! proposes names; policy and execution stay on our side.

pub mod client;
pub mod context;
pub mod parser;

pub use client::LlmClient;
pub use context::ProcessContext;
pub use parser::{parse_reply, InterpretedResult};

use crate::core::error::Result;

/// Capability that turns a command plus process summary into raw reply text
#[allow(async_fn_in_trait)]
pub trait Interpreter {
    async fn interpret(&self, command: &str, process_summary: &str) -> Result<String>;
}
