//! TaskAI - Entry Point
//!
//! Reads commands from the terminal, lets the model pick processes to
//! close, and closes them after confirmation.

use clap::Parser;
use std::path::PathBuf;
use taskai::command::{Assistant, RunReport};
use taskai::core::config::AppConfig;
use taskai::core::error::Result;
use taskai::llm::LlmClient;
use taskai::process::SysinfoProcessTable;
use taskai::ui::TerminalUi;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Close applications by describing them in plain language
#[derive(Parser, Debug)]
#[command(name = "taskai")]
#[command(about = "Ask a language model which processes to close, then close them safely")]
struct Args {
    /// Config file (defaults to ./taskai.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single command and exit
    #[arg(long, short = 'c')]
    command: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the prompt
    let default_directive = if args.verbose { "taskai=debug" } else { "taskai=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::discover(args.config.as_deref())?;
    config.apply_env_overrides();
    let api_key = config.api_key()?;
    let client = LlmClient::from_config(&config.llm, api_key)?;
    tracing::info!(api_url = %config.llm.api_url, format = ?client.api_format(), "TaskAI starting...");

    // Create the async runtime for LLM calls
    let rt = Runtime::new()?;

    let processes = SysinfoProcessTable::new(config.termination.graceful);
    let mut assistant = Assistant::new(client, processes, TerminalUi::stdio(), config);

    if let Some(command) = args.command {
        rt.block_on(assistant.submit_command(&command));
        return Ok(());
    }

    println!("\n=== TASKAI ===");
    println!("Describe what to close, e.g. \"close Chrome\" or \"what is using my memory?\"");
    println!("  quit / q        - Exit");
    println!();

    loop {
        let Some(input) = assistant.ui_mut().read_command()? else {
            break;
        };

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if let RunReport::Completed(outcome) = rt.block_on(assistant.submit_command(&input)) {
            tracing::debug!(killed = outcome.killed_count, "Run complete");
        }
    }

    println!("\nGoodbye!");
    Ok(())
}
