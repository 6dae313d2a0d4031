pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use format::format_bytes;
pub use types::{Pid, ProcessRecord};
