//! Core value types shared across the pipeline

use std::time::Duration;

/// OS process identifier
pub type Pid = u32;

/// A live process as observed at snapshot or resolution time
///
/// Only valid for the run that captured it: the OS may recycle the pid
/// as soon as the process exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
    /// Resident memory in bytes (0 when it could not be read)
    pub memory_bytes: u64,
    /// Accumulated CPU time
    pub cpu_time: Duration,
}

impl ProcessRecord {
    pub fn new(pid: Pid, name: impl Into<String>, memory_bytes: u64, cpu_time: Duration) -> Self {
        Self {
            pid,
            name: name.into(),
            memory_bytes,
            cpu_time,
        }
    }
}
