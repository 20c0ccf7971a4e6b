#![forbid(unsafe_code)]

use crate::domain::Pid;

/// Live processes sharing one resolved name, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessGroup {
    pub name: String,
    pub members: Vec<Pid>,
}

impl ProcessGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }
}
