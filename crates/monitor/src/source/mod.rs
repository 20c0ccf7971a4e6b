#![forbid(unsafe_code)]

mod procfs_source;

pub use procfs_source::ProcfsSource;

use crate::domain::{Pid, ProcessStatus, Snapshot};
use crate::error::Error;
use std::fmt;

/// Read access to the kernel's view of processes.
pub trait SnapshotSource: Send {
    /// Every live pid, in enumeration order.
    fn pids(&self) -> Result<Vec<Pid>, Error>;

    /// Display name and status of a pid, `None` if it vanished.
    fn describe(&self, pid: Pid) -> Option<ProcessEntry>;

    /// Whether `pid` currently names a live process. No side effects.
    fn is_alive(&self, pid: Pid) -> bool;

    /// Capture a fresh snapshot, or `None` when the process is gone.
    ///
    /// Sub-fields that cannot be read degrade to empty or zero values; only
    /// the process itself disappearing yields `None`.
    fn sample(&mut self, pid: Pid) -> Option<Snapshot>;
}

/// One row of the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: Pid,
    /// `None` when the name could not be read.
    pub name: Option<String>,
    pub status: ProcessStatus,
}

impl ProcessEntry {
    pub fn unknown(pid: Pid) -> Self {
        Self {
            pid,
            name: None,
            status: ProcessStatus::Unknown,
        }
    }
}

impl fmt::Display for ProcessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID: {}, Name: {}, State: {}",
            self.pid,
            self.name.as_deref().unwrap_or("Unknown"),
            self.status
        )
    }
}
