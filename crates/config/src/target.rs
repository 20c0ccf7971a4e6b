#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Target {
    /// Substrings matched against the display name of every live process.
    /// A process is eligible for monitoring when its name contains any of
    /// them.
    ///
    /// ## Note
    ///
    /// Matching is plain containment, so `"fire"` also matches `"firewalld"`.
    /// Use the most specific name you can.
    pub names: Vec<String>,
}

impl Target {
    /// Trim entries, drop blank ones and remove duplicates while keeping the
    /// first occurrence. A blank entry would otherwise match every process.
    pub(crate) fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.names.len());
        for name in self.names.drain(..) {
            let name = name.trim().to_owned();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.names = seen;
    }
}
