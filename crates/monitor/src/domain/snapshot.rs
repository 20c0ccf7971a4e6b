#![forbid(unsafe_code)]

use crate::domain::{ConnectionSet, MemoryReading, ProcessStatus};

/// Point-in-time capture of one process. Never mutated; every cycle builds
/// a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    command_line: Vec<String>,
    status: ProcessStatus,
    memory: MemoryReading,
    connections: ConnectionSet,
}

impl Snapshot {
    pub fn new(
        command_line: Vec<String>,
        status: ProcessStatus,
        memory: MemoryReading,
        connections: ConnectionSet,
    ) -> Self {
        Self {
            command_line,
            status,
            memory,
            connections,
        }
    }

    pub fn command_line(&self) -> &[String] {
        &self.command_line
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn memory(&self) -> MemoryReading {
        self.memory
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }
}
