#![forbid(unsafe_code)]

/// Memory counters of one process, in kilobytes as reported by
/// `/proc/<pid>/status`. Counters the kernel did not report are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    /// `VmSize`
    pub virtual_kb: u64,
    /// `VmRSS`
    pub resident_kb: u64,
}

impl MemoryReading {
    pub fn new(virtual_kb: u64, resident_kb: u64) -> Self {
        Self {
            virtual_kb,
            resident_kb,
        }
    }

    pub fn from_counters(vmsize: Option<u64>, vmrss: Option<u64>) -> Self {
        Self::new(vmsize.unwrap_or(0), vmrss.unwrap_or(0))
    }
}
