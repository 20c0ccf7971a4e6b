use crate::report::{ConnectionReport, SocketScope};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Monitor {
    /// Time between two samples of the monitored process. **Measured in
    /// seconds**.
    ///
    /// ## Note
    ///
    /// Every cycle writes at least one memory line to the log, so a short
    /// interval reaches the log size bound sooner.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub interval: Duration,

    /// See [`ConnectionReport`] for possible values.
    pub connection_report: ConnectionReport,

    /// See [`SocketScope`] for possible values.
    pub socket_scope: SocketScope,
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            connection_report: ConnectionReport::default(),
            socket_scope: SocketScope::default(),
        }
    }
}
