#![forbid(unsafe_code)]

use crate::clock::Clock;
use crate::diff::{ConnectionDiff, MemoryDelta};
use crate::domain::{MemoryReading, Snapshot};
use crate::error::Error;
use crate::event::MonitorEvent;
use crate::governor::LogGovernor;
use crate::lifecycle::LifecycleState;
use crate::observer::RunOutcome;
use crate::selection::Target;
use crate::sink::LogSink;
use crate::source::SnapshotSource;
use config::{Config, ConnectionReport};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

pub struct Services {
    pub source: Box<dyn SnapshotSource>,
    pub sink: Box<dyn LogSink>,
    pub clock: Box<dyn Clock>,
}

/// What one poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    /// First successful snapshot; nothing to compare against yet.
    Baseline {
        memory: MemoryReading,
        connections: usize,
    },
    Update {
        connections: ConnectionDiff,
        memory: MemoryDelta,
        status_changed: bool,
    },
    /// The process is gone. `freed` is `None` when it vanished before the
    /// first snapshot.
    Exited { freed: Option<MemoryDelta> },
    /// The log governor stopped the run.
    Terminated { written: u64, limit: u64 },
}

/// Polls one process until it exits, the log bound is hit or the run is
/// cancelled.
pub struct LifecycleMonitor {
    target: Target,
    interval: Duration,
    report: ConnectionReport,
    services: Services,
    governor: LogGovernor,
    state: LifecycleState,
    baseline: Option<MemoryReading>,
    previous: Option<Snapshot>,
    cycles: u64,
}

impl LifecycleMonitor {
    /// The monitor starts in [`LifecycleState::Selected`].
    pub fn new(target: Target, config: &Config, services: Services) -> Self {
        Self {
            target,
            interval: config.monitor.interval,
            report: config.monitor.connection_report,
            services,
            governor: LogGovernor::new(config.log.max_bytes),
            state: LifecycleState::Selected,
            baseline: None,
            previous: None,
            cycles: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn governor(&self) -> &LogGovernor {
        &self.governor
    }

    /// Number of cycles run so far, including the final one.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Execute a single governor/sample/diff cycle without sleeping.
    pub fn cycle(&mut self) -> Result<CycleReport, Error> {
        if self.state.is_finished() {
            return Err(Error::Finished(self.state));
        }
        self.cycles = self.cycles.saturating_add(1);

        if self.governor.should_terminate() {
            return self.terminate();
        }

        match self.services.source.sample(self.target.pid) {
            None => self.exit(),
            Some(current) => match self.previous.take() {
                None => self.record_baseline(current),
                Some(previous) => self.record_update(previous, current),
            },
        }
    }

    /// Run cycles until the process exits, the governor stops the run or the
    /// token is cancelled. Cancellation is only observed between cycles.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<RunOutcome, Error> {
        info!(
            pid = %self.target.pid,
            name = %self.target.name,
            interval = ?self.interval,
            "monitoring started"
        );
        loop {
            if cancel.is_cancelled() {
                self.emit(MonitorEvent::Interrupted)?;
                info!(cycles = self.cycles, "monitoring interrupted");
                return Ok(RunOutcome::Interrupted(self.target.clone()));
            }

            match self.cycle()? {
                CycleReport::Exited { .. } => {
                    return Ok(RunOutcome::Exited(self.target.clone()));
                }
                CycleReport::Terminated { written, limit } => {
                    return Ok(RunOutcome::Terminated {
                        target: self.target.clone(),
                        written,
                        limit,
                    });
                }
                report => trace!(cycle = self.cycles, ?report, "cycle finished"),
            }

            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = self.services.clock.sleep(self.interval) => {}
            }
        }
    }

    fn record_baseline(&mut self, current: Snapshot) -> Result<CycleReport, Error> {
        self.state = self.state.advance(LifecycleState::Monitoring)?;
        let memory = current.memory();
        let connections = current.connections().len();

        self.emit(MonitorEvent::ProcessCreated {
            name: self.target.name.clone(),
            pid: self.target.pid,
        })?;
        self.emit(MonitorEvent::ProcessState {
            status: current.status(),
        })?;
        for (index, token) in current.command_line().iter().enumerate() {
            self.emit(MonitorEvent::CommandLine {
                index,
                token: token.clone(),
            })?;
        }
        self.emit(MonitorEvent::InitialConnections { count: connections })?;
        if self.report == ConnectionReport::Detailed {
            for record in current.connections() {
                self.emit(MonitorEvent::ActiveConnection(record.clone()))?;
            }
        }
        self.emit(MonitorEvent::MemoryUsage {
            reading: memory,
            change: None,
        })?;

        debug!(pid = %self.target.pid, ?memory, connections, "baseline captured");
        self.baseline = Some(memory);
        self.previous = Some(current);
        Ok(CycleReport::Baseline {
            memory,
            connections,
        })
    }

    fn record_update(&mut self, previous: Snapshot, current: Snapshot) -> Result<CycleReport, Error> {
        let status_changed = previous.status() != current.status();
        if status_changed {
            self.emit(MonitorEvent::StateChanged {
                from: previous.status(),
                to: current.status(),
            })?;
        }

        let connections = ConnectionDiff::between(previous.connections(), current.connections());
        if self.report == ConnectionReport::Detailed {
            for record in &connections.added {
                self.emit(MonitorEvent::ConnectionOpened(record.clone()))?;
            }
            for record in &connections.removed {
                self.emit(MonitorEvent::ConnectionClosed(record.clone()))?;
            }
        }
        self.emit(MonitorEvent::NetworkChanges {
            opened: connections.added.len(),
            closed: connections.removed.len(),
        })?;

        let memory = MemoryDelta::usage_change(previous.memory(), current.memory());
        self.emit(MonitorEvent::MemoryUsage {
            reading: current.memory(),
            change: Some(memory),
        })?;

        debug!(
            cycle = self.cycles,
            opened = connections.added.len(),
            closed = connections.removed.len(),
            virtual_kb = memory.virtual_kb,
            resident_kb = memory.resident_kb,
            "snapshot compared"
        );
        self.previous = Some(current);
        Ok(CycleReport::Update {
            connections,
            memory,
            status_changed,
        })
    }

    fn exit(&mut self) -> Result<CycleReport, Error> {
        self.state = self.state.advance(LifecycleState::Exited)?;
        let last = self.previous.take().map(|snapshot| snapshot.memory());
        let freed = self
            .baseline
            .zip(last)
            .map(|(first, last)| MemoryDelta::freed(first, last));

        if let Some(freed) = freed {
            self.emit(MonitorEvent::MemoryFreed(freed))?;
        }
        self.emit(MonitorEvent::ProcessExited {
            name: self.target.name.clone(),
            pid: self.target.pid,
        })?;

        info!(pid = %self.target.pid, cycles = self.cycles, ?freed, "process exited");
        Ok(CycleReport::Exited { freed })
    }

    fn terminate(&mut self) -> Result<CycleReport, Error> {
        self.state = self.state.advance(LifecycleState::Terminated)?;
        self.previous = None;
        let written = self.governor.written();
        let limit = self.governor.limit();

        error!(written, limit, "log size limit exceeded, stopping observer");
        self.emit(MonitorEvent::LogLimitExceeded { written, limit })?;
        Ok(CycleReport::Terminated { written, limit })
    }

    fn emit(&mut self, event: MonitorEvent) -> Result<(), Error> {
        let line = event.render(&self.services.clock.now());
        let written = self.services.sink.append(&line)?;
        self.governor.record(written);
        Ok(())
    }
}
