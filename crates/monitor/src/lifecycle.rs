#![forbid(unsafe_code)]

use crate::error::Error;
use std::fmt;

/// Progress of one observation run.
///
/// ```text
/// Discovering -> Selected -> Monitoring -> Exited
///                    |            |           |
///                    +------------+-----------+--> Terminated
/// ```
///
/// `Selected -> Exited` covers a target that vanishes before its first
/// snapshot. `Terminated` is only reached through the log governor and is an
/// abnormal end of the run, unlike `Exited`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Discovering,
    Selected,
    Monitoring,
    Exited,
    Terminated,
}

impl LifecycleState {
    pub fn can_advance(self, to: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, to),
            (Discovering, Selected)
                | (Selected, Monitoring)
                | (Selected, Exited)
                | (Monitoring, Exited)
                | (Selected | Monitoring | Exited, Terminated)
        )
    }

    pub fn advance(self, to: LifecycleState) -> Result<LifecycleState, Error> {
        if self.can_advance(to) {
            Ok(to)
        } else {
            Err(Error::InvalidTransition { from: self, to })
        }
    }

    /// No more cycles run in this state.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Exited | Self::Terminated)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discovering => "discovering",
            Self::Selected => "selected",
            Self::Monitoring => "monitoring",
            Self::Exited => "exited",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}
