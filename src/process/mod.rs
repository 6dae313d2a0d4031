//! Operating-system process access
//!
//! The pipeline only ever talks to the OS through [`ProcessTable`], so the
//! policy and execution logic can be driven by an in-memory table in tests.

pub mod snapshot;
pub mod system;

pub use snapshot::{capture, render_summary, ProcessGroup};
pub use system::SysinfoProcessTable;

use crate::core::types::{Pid, ProcessRecord};
use std::fmt;

/// Why a single termination attempt did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The pid is gone, or now belongs to a differently named process
    Vanished,
    /// The OS refused the request (access denied, protected process, ...)
    Rejected,
    /// The pid already appeared earlier in the same batch
    DuplicateTarget,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FailureReason::Vanished => "process already exited",
            FailureReason::Rejected => "termination rejected by the OS",
            FailureReason::DuplicateTarget => "already handled in this batch",
        };
        f.write_str(tag)
    }
}

/// Live process table of the host
pub trait ProcessTable {
    /// Enumerate running processes
    ///
    /// Processes whose name cannot be read are left out. Memory that
    /// cannot be read is reported as 0.
    fn list_processes(&mut self) -> Vec<ProcessRecord>;

    /// Terminate `pid`, provided it still carries `expected_name`
    fn terminate(&mut self, pid: Pid, expected_name: &str) -> Result<(), FailureReason>;
}
