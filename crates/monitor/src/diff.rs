#![forbid(unsafe_code)]

//! Differences between two consecutive snapshots.

use crate::domain::{ConnectionSet, MemoryReading};
use std::fmt;

/// Connections that appeared and disappeared between two samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDiff {
    /// In the newer set only.
    pub added: ConnectionSet,
    /// In the older set only.
    pub removed: ConnectionSet,
}

impl ConnectionDiff {
    pub fn between(old: &ConnectionSet, new: &ConnectionSet) -> Self {
        Self {
            added: new.difference(old).cloned().collect(),
            removed: old.difference(new).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Signed change between two [`MemoryReading`]s, in kilobytes.
///
/// The sign depends on the constructor: [`MemoryDelta::usage_change`] is
/// positive when memory grew, [`MemoryDelta::freed`] is positive when it
/// shrank. Negative values are kept as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryDelta {
    pub virtual_kb: i64,
    pub resident_kb: i64,
}

impl MemoryDelta {
    /// `new - old`. Used for the per-cycle usage report.
    pub fn usage_change(old: MemoryReading, new: MemoryReading) -> Self {
        Self {
            virtual_kb: signed_sub(new.virtual_kb, old.virtual_kb),
            resident_kb: signed_sub(new.resident_kb, old.resident_kb),
        }
    }

    /// `first - last`. Used for the exit report, comparing the baseline
    /// reading against the last one taken while the process was alive.
    pub fn freed(first: MemoryReading, last: MemoryReading) -> Self {
        Self::usage_change(last, first)
    }
}

impl fmt::Display for MemoryDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VmSize = {:+} KB, VmRSS = {:+} KB",
            self.virtual_kb, self.resident_kb
        )
    }
}

fn signed_sub(lhs: u64, rhs: u64) -> i64 {
    let diff = i128::from(lhs) - i128::from(rhs);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionRecord;
    use proptest::prelude::*;

    fn set(lines: &[&str]) -> ConnectionSet {
        lines.iter().copied().map(ConnectionRecord::from).collect()
    }

    fn connection_set() -> impl Strategy<Value = ConnectionSet> {
        prop::collection::btree_set("[a-e]{1,3}", 0..12)
            .prop_map(|lines| lines.into_iter().map(ConnectionRecord::new).collect())
    }

    fn reading() -> impl Strategy<Value = MemoryReading> {
        (0..=u64::from(u32::MAX), 0..=u64::from(u32::MAX))
            .prop_map(|(v, r)| MemoryReading::new(v, r))
    }

    #[test]
    fn replaced_connection_is_one_add_one_remove() {
        let diff = ConnectionDiff::between(&set(&["L1", "L2"]), &set(&["L2", "L3"]));
        assert_eq!(diff.added, set(&["L3"]));
        assert_eq!(diff.removed, set(&["L1"]));
    }

    #[test]
    fn growth_is_positive_usage_change() {
        let delta = MemoryDelta::usage_change(
            MemoryReading::new(5000, 2000),
            MemoryReading::new(5200, 2100),
        );
        assert_eq!(delta, MemoryDelta { virtual_kb: 200, resident_kb: 100 });
        assert_eq!(delta.to_string(), "VmSize = +200 KB, VmRSS = +100 KB");
    }

    #[test]
    fn shrink_is_positive_freed() {
        let freed = MemoryDelta::freed(
            MemoryReading::new(5200, 2100),
            MemoryReading::new(5000, 1900),
        );
        assert_eq!(freed, MemoryDelta { virtual_kb: 200, resident_kb: 200 });

        let grown = MemoryDelta::freed(MemoryReading::new(10, 10), MemoryReading::new(30, 15));
        assert_eq!(grown, MemoryDelta { virtual_kb: -20, resident_kb: -5 });
    }

    #[test]
    fn signed_sub_saturates_at_extremes() {
        assert_eq!(signed_sub(u64::MAX, 0), i64::MAX);
        assert_eq!(signed_sub(0, u64::MAX), i64::MIN);
    }

    proptest! {
        #[test]
        fn diff_is_symmetric(a in connection_set(), b in connection_set()) {
            let forward = ConnectionDiff::between(&a, &b);
            let backward = ConnectionDiff::between(&b, &a);
            prop_assert_eq!(&forward.added, &backward.removed);
            prop_assert_eq!(&forward.removed, &backward.added);
        }

        #[test]
        fn diff_of_identical_sets_is_empty(a in connection_set()) {
            let diff = ConnectionDiff::between(&a, &a);
            prop_assert!(diff.is_empty());
        }

        #[test]
        fn diff_against_empty_set(a in connection_set()) {
            let empty = ConnectionSet::new();
            prop_assert_eq!(&ConnectionDiff::between(&empty, &a).added, &a);
            prop_assert!(ConnectionDiff::between(&empty, &a).removed.is_empty());
            prop_assert_eq!(&ConnectionDiff::between(&a, &empty).removed, &a);
            prop_assert!(ConnectionDiff::between(&a, &empty).added.is_empty());
        }

        #[test]
        fn diff_rebuilds_new_set(a in connection_set(), b in connection_set()) {
            let diff = ConnectionDiff::between(&a, &b);
            let rebuilt: ConnectionSet = a
                .difference(&diff.removed)
                .cloned()
                .chain(diff.added.iter().cloned())
                .collect();
            prop_assert_eq!(rebuilt, b);
        }

        #[test]
        fn usage_change_is_additive_inverse(old in reading(), new in reading()) {
            let forward = MemoryDelta::usage_change(old, new);
            let backward = MemoryDelta::usage_change(new, old);
            prop_assert_eq!(forward.virtual_kb, -backward.virtual_kb);
            prop_assert_eq!(forward.resident_kb, -backward.resident_kb);
        }

        #[test]
        fn freed_is_negated_usage_change(first in reading(), last in reading()) {
            let freed = MemoryDelta::freed(first, last);
            let change = MemoryDelta::usage_change(first, last);
            prop_assert_eq!(freed.virtual_kb, -change.virtual_kb);
            prop_assert_eq!(freed.resident_kb, -change.resident_kb);
        }
    }
}
