#![forbid(unsafe_code)]

use std::fmt;
use std::num::NonZeroU32;

/// Handle to a kernel-visible process. Only meaningful while the process
/// exists; callers re-check liveness every cycle instead of caching it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(NonZeroU32);

impl Pid {
    /// Returns `None` for zero and negative values.
    pub fn new(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().and_then(NonZeroU32::new).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The value as the kernel's `pid_t`.
    pub fn as_raw(self) -> i32 {
        // Pid::new only accepts positive i32 values.
        self.0.get() as i32
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pid").field(&self.0.get()).finish()
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
