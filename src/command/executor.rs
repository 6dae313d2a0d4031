//! Termination execution - confirms with the user, then terminates targets
//!
//! Nothing here touches the OS until the user has said yes. After that,
//! termination is best-effort per target: one failure never stops the batch.

use crate::command::resolver::TerminationTarget;
use crate::core::format::format_bytes;
use crate::core::types::Pid;
use crate::process::{FailureReason, ProcessTable};
use crate::ui::UserInterface;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIRM_TITLE: &str = "Confirm Kill";
pub const DONE_TITLE: &str = "Done";

/// A target that could not be terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationFailure {
    pub target: TerminationTarget,
    pub reason: FailureReason,
}

/// Result of executing a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationOutcome {
    pub killed_count: usize,
    pub total_memory_freed: u64,
    pub total_cpu_time: Duration,
    pub failures: Vec<TerminationFailure>,
}

impl TerminationOutcome {
    /// User-facing summary
    pub fn report(&self) -> String {
        let mut text = format!("Killed {} process(es).", self.killed_count);
        if self.total_memory_freed > 0 {
            text.push_str(&format!("\nMemory freed: {}", format_bytes(self.total_memory_freed)));
        }
        let failed = self
            .failures
            .iter()
            .filter(|f| f.reason != FailureReason::DuplicateTarget)
            .count();
        if failed > 0 {
            text.push_str(&format!("\nCould not terminate {} process(es).", failed));
        }
        text
    }
}

/// Executes confirmed termination batches
pub struct TerminationExecutor;

impl TerminationExecutor {
    /// Confirmation text listing each distinct process name once
    pub fn confirmation_text(targets: &[TerminationTarget]) -> String {
        let mut names: Vec<&str> = Vec::new();
        for target in targets {
            if !names.contains(&target.record.name.as_str()) {
                names.push(&target.record.name);
            }
        }
        format!(
            "The assistant suggests killing the following processes:\n\n{}",
            names.join("\n")
        )
    }

    /// Ask the user to approve the batch
    pub fn confirm<U: UserInterface>(ui: &mut U, targets: &[TerminationTarget]) -> bool {
        ui.ask_yes_no(&Self::confirmation_text(targets), CONFIRM_TITLE)
    }

    /// Terminate every target, each pid at most once
    ///
    /// Every target ends up either counted as killed or recorded as a
    /// failure, so `killed_count + failures.len() == targets.len()`.
    pub fn execute<P: ProcessTable>(
        table: &mut P,
        targets: &[TerminationTarget],
    ) -> TerminationOutcome {
        let mut outcome = TerminationOutcome::default();
        let mut handled: HashSet<Pid> = HashSet::new();

        for target in targets {
            let pid = target.record.pid;
            if !handled.insert(pid) {
                outcome.failures.push(TerminationFailure {
                    target: target.clone(),
                    reason: FailureReason::DuplicateTarget,
                });
                continue;
            }

            match table.terminate(pid, &target.record.name) {
                Ok(()) => {
                    info!(pid, name = %target.record.name, "Terminated process");
                    outcome.killed_count += 1;
                    outcome.total_memory_freed =
                        outcome.total_memory_freed.saturating_add(target.pre_kill_memory);
                    outcome.total_cpu_time += target.pre_kill_cpu;
                }
                Err(reason) => {
                    warn!(pid, name = %target.record.name, %reason, "Could not terminate process");
                    outcome.failures.push(TerminationFailure {
                        target: target.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            killed = outcome.killed_count,
            failed = outcome.failures.len(),
            memory_freed = outcome.total_memory_freed,
            cpu_time = ?outcome.total_cpu_time,
            "Termination batch finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::resolver::MatchReason;
    use crate::core::types::ProcessRecord;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Table that terminates known pids and remembers what it was asked
    #[derive(Default)]
    struct FakeTable {
        alive: HashMap<Pid, String>,
        protected: Vec<Pid>,
        calls: Vec<Pid>,
    }

    impl FakeTable {
        fn with(processes: &[(Pid, &str)]) -> Self {
            Self {
                alive: processes.iter().map(|(p, n)| (*p, n.to_string())).collect(),
                ..Self::default()
            }
        }
    }

    impl ProcessTable for FakeTable {
        fn list_processes(&mut self) -> Vec<ProcessRecord> {
            self.alive
                .iter()
                .map(|(pid, name)| ProcessRecord::new(*pid, name.clone(), 0, Duration::ZERO))
                .collect()
        }

        fn terminate(&mut self, pid: Pid, expected_name: &str) -> Result<(), FailureReason> {
            self.calls.push(pid);
            if self.protected.contains(&pid) {
                return Err(FailureReason::Rejected);
            }
            let same_process = self.alive.get(&pid).is_some_and(|name| name == expected_name);
            if same_process {
                self.alive.remove(&pid);
                Ok(())
            } else {
                Err(FailureReason::Vanished)
            }
        }
    }

    fn target(pid: Pid, name: &str, memory: u64) -> TerminationTarget {
        TerminationTarget {
            record: ProcessRecord::new(pid, name, memory, Duration::from_millis(250)),
            pre_kill_memory: memory,
            pre_kill_cpu: Duration::from_millis(250),
            requested: name.to_string(),
            match_reason: MatchReason::ExactName,
        }
    }

    #[test]
    fn test_confirmation_text_dedupes_names() {
        let targets = vec![target(1, "chrome", 1), target(2, "chrome", 1), target(3, "slack", 1)];
        let text = TerminationExecutor::confirmation_text(&targets);
        assert!(text.ends_with("\n\nchrome\nslack"));
    }

    #[test]
    fn test_execute_success_accumulates() {
        let mut table = FakeTable::with(&[(1, "chrome"), (2, "chrome")]);
        let targets = vec![target(1, "chrome", 100), target(2, "chrome", 50)];
        let outcome = TerminationExecutor::execute(&mut table, &targets);
        assert_eq!(outcome.killed_count, 2);
        assert_eq!(outcome.total_memory_freed, 150);
        assert_eq!(outcome.total_cpu_time, Duration::from_millis(500));
        assert!(outcome.failures.is_empty());
        assert!(table.alive.is_empty());
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let mut table = FakeTable::with(&[(1, "a"), (3, "c")]);
        table.protected.push(1);
        let targets = vec![target(1, "a", 10), target(2, "b", 20), target(3, "c", 30)];
        let outcome = TerminationExecutor::execute(&mut table, &targets);

        assert_eq!(outcome.killed_count, 1);
        assert_eq!(outcome.total_memory_freed, 30);
        let reasons: Vec<_> = outcome.failures.iter().map(|f| f.reason).collect();
        assert_eq!(reasons, vec![FailureReason::Rejected, FailureReason::Vanished]);
        assert_eq!(table.calls, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_pid_terminated_once() {
        let mut table = FakeTable::with(&[(7, "notepad++")]);
        let targets = vec![target(7, "notepad++", 15), target(7, "notepad++", 15)];
        let outcome = TerminationExecutor::execute(&mut table, &targets);

        assert_eq!(table.calls, vec![7]);
        assert_eq!(outcome.killed_count, 1);
        assert_eq!(outcome.total_memory_freed, 15);
        assert_eq!(outcome.failures[0].reason, FailureReason::DuplicateTarget);
        assert_eq!(outcome.report(), "Killed 1 process(es).\nMemory freed: 15 B");
    }

    #[test]
    fn test_report_without_memory() {
        let outcome = TerminationOutcome::default();
        assert_eq!(outcome.report(), "Killed 0 process(es).");
    }

    #[test]
    fn test_report_mentions_real_failures() {
        let outcome = TerminationOutcome {
            killed_count: 1,
            total_memory_freed: 10 * 1024 * 1024,
            total_cpu_time: Duration::ZERO,
            failures: vec![TerminationFailure {
                target: target(2, "b", 1),
                reason: FailureReason::Rejected,
            }],
        };
        assert_eq!(
            outcome.report(),
            "Killed 1 process(es).\nMemory freed: 10 MB\nCould not terminate 1 process(es)."
        );
    }

    proptest! {
        #[test]
        fn prop_every_target_accounted_for(
            pids in prop::collection::vec(0u32..8, 0..16),
            alive in prop::collection::vec(0u32..8, 0..8),
        ) {
            let names: Vec<(Pid, String)> = alive.iter().map(|p| (*p, format!("p{}", p))).collect();
            let mut table = FakeTable {
                alive: names.into_iter().collect(),
                ..FakeTable::default()
            };
            let targets: Vec<_> = pids.iter().map(|p| target(*p, &format!("p{}", p), 1)).collect();
            let outcome = TerminationExecutor::execute(&mut table, &targets);

            prop_assert_eq!(outcome.killed_count + outcome.failures.len(), targets.len());
            prop_assert!(outcome.killed_count <= targets.len());
            prop_assert_eq!(outcome.total_memory_freed, outcome.killed_count as u64);
        }
    }
}
