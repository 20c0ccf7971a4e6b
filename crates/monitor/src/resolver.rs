#![forbid(unsafe_code)]

use crate::domain::{Pid, ProcessGroup};
use crate::error::Error;
use crate::source::{ProcessEntry, SnapshotSource};
use config::Config;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Allow-list of target name substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetPolicy {
    names: Vec<String>,
}

impl TargetPolicy {
    pub fn new<T, U>(names: T) -> Self
    where
        T: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target.names.iter().cloned())
    }

    /// A name is eligible when it contains any configured entry. An empty
    /// policy matches nothing.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|target| name.contains(target.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Enumerate live processes and group the ones the policy accepts by their
/// exact name.
///
/// Groups appear in the order their first member was enumerated, members in
/// enumeration order. An unreadable process table yields no groups.
pub fn discover(source: &dyn SnapshotSource, policy: &TargetPolicy) -> Vec<ProcessGroup> {
    let pids = match source.pids() {
        Ok(pids) => pids,
        Err(err) => {
            warn!(%err, "process table cannot be enumerated");
            return Vec::new();
        }
    };

    let mut groups: Vec<ProcessGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut seen: HashSet<Pid> = HashSet::new();

    for pid in pids {
        if !seen.insert(pid) {
            continue;
        }
        let Some(entry) = source.describe(pid) else {
            trace!(%pid, "vanished while reading, skipping");
            continue;
        };
        if entry.status.is_gone() {
            trace!(%pid, status = %entry.status, "already exited, skipping");
            continue;
        }
        let Some(name) = entry.name else {
            trace!(%pid, "no name, skipping");
            continue;
        };
        if !policy.matches(&name) {
            continue;
        }
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            groups.push(ProcessGroup::new(name.clone()));
            groups.len() - 1
        });
        groups[slot].members.push(pid);
    }

    debug!(
        group_count = groups.len(),
        targets = ?policy.names(),
        "discovery finished"
    );
    groups
}

/// Every process with its name and status. Rows whose details vanished
/// while reading are kept with unknown values.
pub fn list_processes(source: &dyn SnapshotSource) -> Result<Vec<ProcessEntry>, Error> {
    Ok(source
        .pids()?
        .into_iter()
        .map(|pid| {
            source
                .describe(pid)
                .unwrap_or_else(|| ProcessEntry::unknown(pid))
        })
        .collect())
}
