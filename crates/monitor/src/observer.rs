#![forbid(unsafe_code)]

use crate::domain::ProcessGroup;
use crate::error::Error;
use crate::monitor::{LifecycleMonitor, Services};
use crate::resolver::{TargetPolicy, discover};
use crate::selection::{Selector, Target};
use config::Config;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How an observation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Discovery found no matching process.
    NothingToMonitor,
    /// Processes were found but none was selected.
    Declined,
    /// The monitored process exited.
    Exited(Target),
    /// The operator stopped the run.
    Interrupted(Target),
    /// The log size bound was reached.
    Terminated {
        target: Target,
        written: u64,
        limit: u64,
    },
}

impl RunOutcome {
    /// Only a forced stop by the log governor is abnormal.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Terminated { .. })
    }
}

/// Discovery, selection and monitoring of one target.
pub struct Observer {
    config: Config,
    services: Services,
}

impl Observer {
    pub fn new(config: Config, services: Services) -> Self {
        Self { config, services }
    }

    pub fn discover(&self) -> Vec<ProcessGroup> {
        let policy = TargetPolicy::from_config(&self.config);
        discover(self.services.source.as_ref(), &policy)
    }

    pub async fn run(
        self,
        selector: &mut dyn Selector,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, Error> {
        let groups = self.discover();
        if groups.is_empty() {
            info!(targets = ?self.config.target.names, "no discoverable processes");
            return Ok(RunOutcome::NothingToMonitor);
        }

        let Some(target) = selector.select(&groups)? else {
            info!("no process selected");
            return Ok(RunOutcome::Declined);
        };
        debug!(pid = %target.pid, name = %target.name, "target selected");

        let mut monitor = LifecycleMonitor::new(target, &self.config, self.services);
        monitor.run(&cancel).await
    }
}
