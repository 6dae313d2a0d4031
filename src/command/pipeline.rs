//! One run of the assistant, from user text to a single report
//!
//! capture -> interpret -> parse -> filter -> resolve -> confirm -> execute.
//! Each step finishes before the next starts; every path ends with at most
//! one message to the user.

use crate::command::executor::{TerminationExecutor, TerminationOutcome, DONE_TITLE};
use crate::command::{resolver, safety};
use crate::core::config::AppConfig;
use crate::llm::{parse_reply, InterpretedResult, Interpreter};
use crate::process::{capture, render_summary, ProcessTable};
use crate::ui::UserInterface;
use tracing::{debug, info, warn};

pub const RESPONSE_TITLE: &str = "Assistant";
pub const ERROR_TITLE: &str = "Error";
pub const PROTECTED_TITLE: &str = "Protected Process Filter";
pub const NO_MATCH_TITLE: &str = "No Processes Found";

pub const NO_SAFE_PROCESSES: &str = "No safe processes found to kill.";
pub const NO_MATCHING_PROCESSES: &str = "No matching processes found running.";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Blank input; no run was started
    Ignored,
    /// The model answered with prose
    Message(String),
    /// The model call failed; nothing was touched
    InterpretFailed(String),
    /// Every requested name was protected
    NoSafeProcesses,
    /// Approved names matched nothing running
    NoMatches,
    /// The user declined the confirmation
    Declined,
    Completed(TerminationOutcome),
}

/// The assistant: owns its collaborators and runs one command at a time
pub struct Assistant<I, P, U> {
    interpreter: I,
    processes: P,
    ui: U,
    config: AppConfig,
}

impl<I, P, U> Assistant<I, P, U>
where
    I: Interpreter,
    P: ProcessTable,
    U: UserInterface,
{
    pub fn new(interpreter: I, processes: P, ui: U, config: AppConfig) -> Self {
        Self {
            interpreter,
            processes,
            ui,
            config,
        }
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Run one user command to completion and show its report
    pub async fn submit_command(&mut self, text: &str) -> RunReport {
        let command = text.trim();
        if command.is_empty() {
            return RunReport::Ignored;
        }

        let report = self.run(command).await;
        self.show(&report);
        report
    }

    async fn run(&mut self, command: &str) -> RunReport {
        let groups = capture(&self.processes.list_processes(), self.config.snapshot.max_groups);
        let summary = render_summary(&groups);
        debug!(groups = groups.len(), "Captured process snapshot");

        let reply = match self.interpreter.interpret(command, &summary).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Interpretation failed");
                return RunReport::InterpretFailed(e.to_string());
            }
        };

        let requested = match parse_reply(&reply) {
            InterpretedResult::PlainMessage(text) => return RunReport::Message(text),
            InterpretedResult::KillDirective(names) => names,
        };
        info!(?requested, "Model requested termination");

        let approved = safety::filter(&requested);
        if approved.is_empty() {
            return RunReport::NoSafeProcesses;
        }

        // Re-read the table: anything seen at capture time may be gone by now
        let live = self.processes.list_processes();
        let targets = resolver::resolve(&approved, &live);
        if targets.is_empty() {
            return RunReport::NoMatches;
        }

        if !TerminationExecutor::confirm(&mut self.ui, &targets) {
            info!(targets = targets.len(), "User declined termination");
            return RunReport::Declined;
        }

        RunReport::Completed(TerminationExecutor::execute(&mut self.processes, &targets))
    }

    fn show(&mut self, report: &RunReport) {
        match report {
            RunReport::Ignored | RunReport::Declined => {}
            RunReport::Message(text) => self.ui.show_message(text, RESPONSE_TITLE),
            RunReport::InterpretFailed(error) => {
                self.ui.show_message(&format!("Error: {}", error), ERROR_TITLE)
            }
            RunReport::NoSafeProcesses => self.ui.show_message(NO_SAFE_PROCESSES, PROTECTED_TITLE),
            RunReport::NoMatches => self.ui.show_message(NO_MATCHING_PROCESSES, NO_MATCH_TITLE),
            RunReport::Completed(outcome) => self.ui.show_message(&outcome.report(), DONE_TITLE),
        }
    }
}
