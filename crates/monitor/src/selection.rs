#![forbid(unsafe_code)]

use crate::domain::{Pid, ProcessGroup};
use crate::error::Error;
use std::fmt;

/// The process picked for monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub pid: Pid,
    pub name: String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (PID {})", self.name, self.pid)
    }
}

pub trait Selector {
    /// Pick one member of one group. `Ok(None)` means nothing was chosen and
    /// the run ends without monitoring.
    fn select(&mut self, groups: &[ProcessGroup]) -> Result<Option<Target>, Error>;
}

/// First member of the first group.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMatch;

impl Selector for FirstMatch {
    fn select(&mut self, groups: &[ProcessGroup]) -> Result<Option<Target>, Error> {
        Ok(groups.iter().find_map(|group| {
            group.members.first().map(|pid| Target {
                pid: *pid,
                name: group.name.clone(),
            })
        }))
    }
}

/// A specific pid, provided it was discovered.
#[derive(Debug, Clone, Copy)]
pub struct ByPid(pub Pid);

impl Selector for ByPid {
    fn select(&mut self, groups: &[ProcessGroup]) -> Result<Option<Target>, Error> {
        Ok(groups
            .iter()
            .find(|group| group.contains(self.0))
            .map(|group| Target {
                pid: self.0,
                name: group.name.clone(),
            }))
    }
}
