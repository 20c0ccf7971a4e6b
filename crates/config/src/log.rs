use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 2 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Log {
    /// File the audit log is appended to. Created if missing, never
    /// truncated.
    pub path: PathBuf,

    /// Upper bound on the bytes written during one run. Once reached the
    /// observer writes a final line and exits with a non-zero status.
    ///
    /// ## Note
    ///
    /// The bound is checked once per cycle, so the file may grow past it by
    /// up to one cycle worth of lines.
    pub max_bytes: u64,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            path: PathBuf::from("procwatch.log"),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}
