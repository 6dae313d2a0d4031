//! `sysinfo`-backed process table

use crate::core::types::{Pid, ProcessRecord};
use crate::process::{FailureReason, ProcessTable};
use std::time::Duration;
use sysinfo::{Pid as SysPid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};
use tracing::debug;

/// Process table of the local host
pub struct SysinfoProcessTable {
    system: System,
    graceful: bool,
}

impl SysinfoProcessTable {
    /// `graceful` requests SIGTERM-style termination where supported
    pub fn new(graceful: bool) -> Self {
        Self {
            system: System::new(),
            graceful,
        }
    }

    fn refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing().with_memory().with_cpu()
    }

    fn send_termination(&self, process: &sysinfo::Process) -> bool {
        if self.graceful {
            if let Some(sent) = process.kill_with(Signal::Term) {
                return sent;
            }
            debug!(pid = process.pid().as_u32(), "Polite termination unsupported, killing");
        }
        process.kill()
    }
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Drop a trailing `.exe` so names match the form users type
pub fn display_name(raw: &str) -> &str {
    let len = raw.len();
    if len > 4 && raw.is_char_boundary(len - 4) && raw[len - 4..].eq_ignore_ascii_case(".exe") {
        &raw[..len - 4]
    } else {
        raw
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn list_processes(&mut self) -> Vec<ProcessRecord> {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());

        let mut records: Vec<ProcessRecord> = self
            .system
            .processes()
            .iter()
            .filter_map(|(pid, process)| {
                let raw = process.name().to_string_lossy();
                let name = display_name(raw.trim());
                if name.is_empty() {
                    return None;
                }
                Some(ProcessRecord::new(
                    pid.as_u32(),
                    name,
                    process.memory(),
                    Duration::from_millis(process.accumulated_cpu_time()),
                ))
            })
            .collect();

        records.sort_by_key(|r| r.pid);
        debug!(count = records.len(), "Enumerated processes");
        records
    }

    fn terminate(&mut self, pid: Pid, expected_name: &str) -> Result<(), FailureReason> {
        let sys_pid = SysPid::from_u32(pid);
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            Self::refresh_kind(),
        );

        let Some(process) = self.system.process(sys_pid) else {
            return Err(FailureReason::Vanished);
        };

        // Guard against pid reuse since the target was resolved
        let raw = process.name().to_string_lossy();
        if !display_name(raw.trim()).eq_ignore_ascii_case(expected_name) {
            debug!(pid, expected_name, current = %raw, "Pid now belongs to another process");
            return Err(FailureReason::Vanished);
        }

        if self.send_termination(process) {
            Ok(())
        } else {
            Err(FailureReason::Rejected)
        }
    }
}
