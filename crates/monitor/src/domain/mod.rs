#![forbid(unsafe_code)]

mod connection;
mod group;
mod memory;
mod pid;
mod snapshot;
mod status;

pub use connection::{ConnectionRecord, ConnectionSet};
pub use group::ProcessGroup;
pub use memory::MemoryReading;
pub use pid::Pid;
pub use snapshot::Snapshot;
pub use status::ProcessStatus;
