#![forbid(unsafe_code)]

/// Hard cap on the audit log volume of one run.
///
/// The counter only grows. It starts at zero when the governor is built and
/// is never reset; crossing the limit ends the run.
#[derive(Debug, Clone)]
pub struct LogGovernor {
    limit: u64,
    written: u64,
}

impl LogGovernor {
    pub fn new(limit: u64) -> Self {
        Self { limit, written: 0 }
    }

    pub fn record(&mut self, bytes: usize) {
        self.written = self.written.saturating_add(bytes as u64);
    }

    /// Checked once per cycle, before the cycle emits anything.
    pub fn should_terminate(&self) -> bool {
        self.written >= self.limit
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}
