//! TaskAI - natural-language process control

pub mod command;
pub mod core;
pub mod llm;
pub mod process;
pub mod ui;
