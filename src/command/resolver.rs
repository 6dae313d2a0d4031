//! Target resolution - matches approved names against live processes

use crate::command::safety::ApprovedNames;
use crate::core::types::ProcessRecord;
use std::time::Duration;
use tracing::debug;

/// A live process selected for termination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationTarget {
    pub record: ProcessRecord,
    /// Memory held just before termination, credited as freed on success
    pub pre_kill_memory: u64,
    pub pre_kill_cpu: Duration,
    /// The approved name this target was matched by
    pub requested: String,
    pub match_reason: MatchReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    ExactName,
    PartialName,
}

/// Match each approved name against `live`, in approval order
///
/// A name matches a process whose name equals it or contains it, ignoring
/// case. One name may yield many targets, and a process matched by two
/// names appears twice; the executor handles each pid only once.
pub fn resolve(approved: &ApprovedNames, live: &[ProcessRecord]) -> Vec<TerminationTarget> {
    let mut targets = Vec::new();

    for requested in approved.iter() {
        let requested_lower = requested.to_lowercase();

        for record in live {
            let Some(match_reason) = match_name(&record.name.to_lowercase(), &requested_lower)
            else {
                continue;
            };

            debug!(pid = record.pid, name = %record.name, requested, ?match_reason, "Resolved target");
            targets.push(TerminationTarget {
                record: record.clone(),
                pre_kill_memory: record.memory_bytes,
                pre_kill_cpu: record.cpu_time,
                requested: requested.to_string(),
                match_reason,
            });
        }
    }

    targets
}

fn match_name(process_lower: &str, requested_lower: &str) -> Option<MatchReason> {
    if process_lower == requested_lower {
        Some(MatchReason::ExactName)
    } else if process_lower.contains(requested_lower) {
        Some(MatchReason::PartialName)
    } else {
        None
    }
}
