#![forbid(unsafe_code)]

use std::fmt;

/// Scheduler state of a process, derived once from the `State:` field of
/// `/proc/<pid>/status` (e.g. `"S (sleeping)"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    /// `R`
    Running,
    /// `S`, interruptible sleep.
    Sleeping,
    /// `D`, uninterruptible sleep, usually waiting on I/O.
    DiskSleep,
    /// `I`, idle kernel thread.
    Idle,
    /// `T`
    Stopped,
    /// `t`, stopped by a tracer.
    Traced,
    /// `Z`, exited but not yet reaped.
    Zombie,
    /// `X` or `x`
    Dead,
    /// Missing or unrecognized state field.
    Unknown,
}

impl ProcessStatus {
    pub fn from_state_field(field: &str) -> Self {
        let field = field.trim_start();
        let field = field.strip_prefix("State:").unwrap_or(field).trim_start();
        match field.chars().next() {
            Some('R') => Self::Running,
            Some('S') => Self::Sleeping,
            Some('D') => Self::DiskSleep,
            Some('I') => Self::Idle,
            Some('T') => Self::Stopped,
            Some('t') => Self::Traced,
            Some('Z') => Self::Zombie,
            Some('X' | 'x') => Self::Dead,
            _ => Self::Unknown,
        }
    }

    /// The process has exited even though its `/proc` entry may linger.
    pub fn is_gone(self) -> bool {
        matches!(self, Self::Zombie | Self::Dead)
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "Running",
            Self::Sleeping => "Sleeping",
            Self::DiskSleep => "Disk Sleep",
            Self::Idle => "Idle",
            Self::Stopped => "Stopped",
            Self::Traced => "Traced",
            Self::Zombie => "Zombie",
            Self::Dead => "Dead",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kernel_state_text() {
        assert_eq!(ProcessStatus::from_state_field("R (running)"), ProcessStatus::Running);
        assert_eq!(
            ProcessStatus::from_state_field("State:\tS (sleeping)"),
            ProcessStatus::Sleeping
        );
        assert_eq!(ProcessStatus::from_state_field("D (disk sleep)"), ProcessStatus::DiskSleep);
        assert_eq!(ProcessStatus::from_state_field("I (idle)"), ProcessStatus::Idle);
        assert_eq!(ProcessStatus::from_state_field("T (stopped)"), ProcessStatus::Stopped);
        assert_eq!(ProcessStatus::from_state_field("t (tracing stop)"), ProcessStatus::Traced);
        assert_eq!(ProcessStatus::from_state_field("Z (zombie)"), ProcessStatus::Zombie);
        assert_eq!(ProcessStatus::from_state_field("X (dead)"), ProcessStatus::Dead);
        assert_eq!(ProcessStatus::from_state_field(""), ProcessStatus::Unknown);
        assert_eq!(ProcessStatus::from_state_field("? what"), ProcessStatus::Unknown);
    }

    #[test]
    fn only_zombie_and_dead_are_gone() {
        assert!(ProcessStatus::Zombie.is_gone());
        assert!(ProcessStatus::Dead.is_gone());
        assert!(!ProcessStatus::Stopped.is_gone());
        assert!(!ProcessStatus::Unknown.is_gone());
    }
}
