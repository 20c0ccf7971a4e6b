#![forbid(unsafe_code)]

use crate::diff::MemoryDelta;
use crate::domain::{ConnectionRecord, MemoryReading, Pid, ProcessStatus};
use chrono::{DateTime, Local};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the audit log, without its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    ProcessCreated {
        name: String,
        pid: Pid,
    },
    ProcessState {
        status: ProcessStatus,
    },
    StateChanged {
        from: ProcessStatus,
        to: ProcessStatus,
    },
    CommandLine {
        index: usize,
        token: String,
    },
    InitialConnections {
        count: usize,
    },
    ActiveConnection(ConnectionRecord),
    ConnectionOpened(ConnectionRecord),
    ConnectionClosed(ConnectionRecord),
    NetworkChanges {
        opened: usize,
        closed: usize,
    },
    MemoryUsage {
        reading: MemoryReading,
        change: Option<MemoryDelta>,
    },
    MemoryFreed(MemoryDelta),
    ProcessExited {
        name: String,
        pid: Pid,
    },
    LogLimitExceeded {
        written: u64,
        limit: u64,
    },
    Interrupted,
}

impl MonitorEvent {
    /// `[<timestamp>] <description>`
    pub fn render(&self, at: &DateTime<Local>) -> String {
        format!("[{}] {self}", at.format(TIMESTAMP_FORMAT))
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessCreated { name, pid } => write!(f, "Process Created: {name} (PID {pid})"),
            Self::ProcessState { status } => write!(f, "Process State: {status}"),
            Self::StateChanged { from, to } => {
                write!(f, "Process State Changed: {from} -> {to}")
            }
            Self::CommandLine { index, token } => write!(f, "Command Line [{index}]: {token}"),
            Self::InitialConnections { count } => write!(f, "Initial Connections: {count}"),
            Self::ActiveConnection(record) => write!(f, "Active Connection: {record}"),
            Self::ConnectionOpened(record) => write!(f, "New Connection Detected: {record}"),
            Self::ConnectionClosed(record) => write!(f, "Connection Closed: {record}"),
            Self::NetworkChanges { opened, closed } => write!(
                f,
                "Network Changes: New Connections = {opened}, Closed Connections = {closed}"
            ),
            Self::MemoryUsage { reading, change } => {
                write!(
                    f,
                    "Memory Usage: VmSize = {} KB, VmRSS = {} KB",
                    reading.virtual_kb, reading.resident_kb
                )?;
                if let Some(change) = change {
                    write!(f, " (Change: {change})")?;
                }
                Ok(())
            }
            Self::MemoryFreed(freed) => write!(
                f,
                "Memory Freed: VmSize = {} KB, VmRSS = {} KB",
                freed.virtual_kb, freed.resident_kb
            ),
            Self::ProcessExited { name, pid } => {
                write!(f, "Process Terminated: {name} (PID {pid})")
            }
            Self::LogLimitExceeded { written, limit } => write!(
                f,
                "Log Size Limit Exceeded: {written} of {limit} bytes written, stopping observer"
            ),
            Self::Interrupted => f.write_str("Monitoring Stopped: interrupted by operator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn render_prefixes_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let line = MonitorEvent::NetworkChanges {
            opened: 1,
            closed: 1,
        }
        .render(&at);
        assert_eq!(
            line,
            "[2024-03-09 07:05:01] Network Changes: New Connections = 1, Closed Connections = 1"
        );
    }

    #[test]
    fn memory_lines() {
        let baseline = MonitorEvent::MemoryUsage {
            reading: MemoryReading::new(5000, 2000),
            change: None,
        };
        assert_eq!(baseline.to_string(), "Memory Usage: VmSize = 5000 KB, VmRSS = 2000 KB");

        let update = MonitorEvent::MemoryUsage {
            reading: MemoryReading::new(4900, 2100),
            change: Some(MemoryDelta {
                virtual_kb: -100,
                resident_kb: 100,
            }),
        };
        assert_eq!(
            update.to_string(),
            "Memory Usage: VmSize = 4900 KB, VmRSS = 2100 KB (Change: VmSize = -100 KB, VmRSS = +100 KB)"
        );

        let freed = MonitorEvent::MemoryFreed(MemoryDelta {
            virtual_kb: 200,
            resident_kb: -3,
        });
        assert_eq!(freed.to_string(), "Memory Freed: VmSize = 200 KB, VmRSS = -3 KB");
    }

    #[test]
    fn connection_lines_carry_raw_record() {
        let record = ConnectionRecord::from("tcp 127.0.0.1:80 -> 0.0.0.0:0 Listen inode=7");
        assert_eq!(
            MonitorEvent::ConnectionOpened(record.clone()).to_string(),
            "New Connection Detected: tcp 127.0.0.1:80 -> 0.0.0.0:0 Listen inode=7"
        );
        assert_eq!(
            MonitorEvent::ConnectionClosed(record).to_string(),
            "Connection Closed: tcp 127.0.0.1:80 -> 0.0.0.0:0 Listen inode=7"
        );
    }
}
