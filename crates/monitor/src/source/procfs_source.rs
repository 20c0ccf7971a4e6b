#![forbid(unsafe_code)]

use crate::domain::{ConnectionRecord, ConnectionSet, MemoryReading, Pid, ProcessStatus, Snapshot};
use crate::error::Error;
use crate::source::{ProcessEntry, SnapshotSource};
use config::SocketScope;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use procfs::ProcResult;
use procfs::process::{FDTarget, Process};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{trace, warn};

/// [`SnapshotSource`] backed by `/proc`.
#[derive(Debug, Default, Clone)]
pub struct ProcfsSource {
    scope: SocketScope,
}

impl ProcfsSource {
    pub fn new(scope: SocketScope) -> Self {
        Self { scope }
    }

    fn open(pid: Pid) -> Option<Process> {
        Process::new(pid.as_raw()).ok()
    }

    fn read_status(process: &Process, pid: Pid) -> (ProcessStatus, MemoryReading) {
        match process.status() {
            Ok(status) => (
                ProcessStatus::from_state_field(&status.state),
                MemoryReading::from_counters(status.vmsize, status.vmrss),
            ),
            Err(err) => {
                trace!(%pid, ?err, "status unavailable");
                (ProcessStatus::Unknown, MemoryReading::default())
            }
        }
    }

    fn read_command_line(process: &Process, pid: Pid) -> Vec<String> {
        process.cmdline().unwrap_or_else(|err| {
            trace!(%pid, ?err, "command line unavailable");
            Vec::new()
        })
    }

    /// Inodes of the sockets held open by the process.
    fn socket_inodes(process: &Process, pid: Pid) -> Option<HashSet<u64>> {
        let fds = match process.fd() {
            Ok(fds) => fds,
            Err(err) => {
                trace!(%pid, ?err, "file descriptors unavailable");
                return None;
            }
        };
        Some(
            fds.filter_map(Result::ok)
                .filter_map(|fd| match fd.target {
                    FDTarget::Socket(inode) => Some(inode),
                    _ => None,
                })
                .collect(),
        )
    }

    fn read_connections(&self, process: &Process, pid: Pid) -> ConnectionSet {
        let mut records = ConnectionSet::new();
        let owned = match self.scope {
            SocketScope::Process => match Self::socket_inodes(process, pid) {
                Some(inodes) => Some(inodes),
                None => return records,
            },
            SocketScope::Namespace => None,
        };
        let keep = |inode: u64| owned.as_ref().is_none_or(|inodes| inodes.contains(&inode));

        for (proto, table) in [("tcp", process.tcp()), ("tcp6", process.tcp6())] {
            for entry in Self::table(proto, table, pid) {
                if keep(entry.inode) {
                    records.insert(Self::record(
                        proto,
                        entry.local_address,
                        entry.remote_address,
                        format_args!("{:?}", entry.state),
                        entry.inode,
                    ));
                }
            }
        }
        for (proto, table) in [("udp", process.udp()), ("udp6", process.udp6())] {
            for entry in Self::table(proto, table, pid) {
                if keep(entry.inode) {
                    records.insert(Self::record(
                        proto,
                        entry.local_address,
                        entry.remote_address,
                        format_args!("{:?}", entry.state),
                        entry.inode,
                    ));
                }
            }
        }
        records
    }

    fn table<T>(proto: &str, table: ProcResult<Vec<T>>, pid: Pid) -> Vec<T> {
        table.unwrap_or_else(|err| {
            trace!(%pid, proto, ?err, "socket table unavailable");
            Vec::new()
        })
    }

    fn record(
        proto: &str,
        local: impl Display,
        remote: impl Display,
        state: impl Display,
        inode: u64,
    ) -> ConnectionRecord {
        ConnectionRecord::new(format!("{proto} {local} -> {remote} {state} inode={inode}"))
    }
}

impl SnapshotSource for ProcfsSource {
    fn pids(&self) -> Result<Vec<Pid>, Error> {
        let mut pids = Vec::new();
        for process in procfs::process::all_processes()? {
            match process {
                Ok(process) => pids.extend(Pid::new(process.pid)),
                Err(err) => trace!(?err, "skipping unreadable process entry"),
            }
        }
        Ok(pids)
    }

    fn describe(&self, pid: Pid) -> Option<ProcessEntry> {
        let process = Self::open(pid)?;
        let name = process.stat().map(|stat| stat.comm).ok();
        let status = process
            .status()
            .map(|status| ProcessStatus::from_state_field(&status.state))
            .unwrap_or(ProcessStatus::Unknown);
        if name.is_none() && status == ProcessStatus::Unknown {
            return None;
        }
        Some(ProcessEntry { pid, name, status })
    }

    fn is_alive(&self, pid: Pid) -> bool {
        match kill(nix::unistd::Pid::from_raw(pid.as_raw()), None::<Signal>) {
            Ok(()) | Err(Errno::EPERM) => true,
            Err(Errno::ESRCH) => false,
            Err(err) => {
                warn!(%pid, %err, "unexpected liveness probe failure");
                false
            }
        }
    }

    fn sample(&mut self, pid: Pid) -> Option<Snapshot> {
        if !self.is_alive(pid) {
            return None;
        }
        let process = Self::open(pid)?;
        let (status, memory) = Self::read_status(&process, pid);
        if status.is_gone() {
            trace!(%pid, %status, "process has exited");
            return None;
        }
        let command_line = Self::read_command_line(&process, pid);
        let connections = self.read_connections(&process, pid);
        Some(Snapshot::new(command_line, status, memory, connections))
    }
}
