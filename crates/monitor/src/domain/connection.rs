#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Opaque descriptor of one network connection at sample time.
///
/// Two records are the same connection when their text is identical; the
/// address fields are never interpreted.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionRecord(Arc<str>);

/// The connections of one snapshot. Ordered so detailed log output is
/// stable between runs.
pub type ConnectionSet = BTreeSet<ConnectionRecord>;

impl ConnectionRecord {
    pub fn new(line: impl Into<Arc<str>>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionRecord {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl fmt::Debug for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionRecord").field(&&*self.0).finish()
    }
}

impl fmt::Display for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
