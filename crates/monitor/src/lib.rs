#![forbid(unsafe_code)]

pub mod clock;
pub mod diff;
pub mod domain;
pub mod error;
pub mod event;
pub mod governor;
pub mod lifecycle;
pub mod monitor;
pub mod observer;
pub mod resolver;
pub mod selection;
pub mod sink;
pub mod source;

pub use clock::{Clock, SystemClock};
pub use diff::{ConnectionDiff, MemoryDelta};
pub use domain::{
    ConnectionRecord, ConnectionSet, MemoryReading, Pid, ProcessGroup, ProcessStatus, Snapshot,
};
pub use error::Error;
pub use event::MonitorEvent;
pub use governor::LogGovernor;
pub use lifecycle::LifecycleState;
pub use monitor::{CycleReport, LifecycleMonitor, Services};
pub use observer::{Observer, RunOutcome};
pub use resolver::{TargetPolicy, discover, list_processes};
pub use selection::{ByPid, FirstMatch, Selector, Target};
pub use sink::{FileSink, LogSink, MemorySink};
pub use source::{ProcessEntry, ProcfsSource, SnapshotSource};
