use serde::{Deserialize, Serialize};

/// How connection changes are written to the audit log.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionReport {
    /// One `Network Changes` line per cycle with the number of opened and
    /// closed connections.
    #[default]
    #[serde(rename = "summary")]
    Summary,

    /// Every opened and closed connection gets its own line, followed by the
    /// `Network Changes` count line.
    #[serde(rename = "detailed")]
    Detailed,
}

/// Which sockets count as connections of the monitored process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketScope {
    /// Only sockets referenced by one of the process's file descriptors.
    /// Requires permission to read `/proc/<pid>/fd`.
    #[default]
    #[serde(rename = "process")]
    Process,

    /// Every socket of the process's network namespace.
    #[serde(rename = "namespace")]
    Namespace,
}
