#![forbid(unsafe_code)]

use crate::cli::WatchArgs;
use crate::prompt::PromptSelector;
use crate::signals::cancel_on_signal;
use anyhow::{Context, bail};
use config::Config;
use monitor::{
    ByPid, FileSink, FirstMatch, Observer, ProcfsSource, RunOutcome, Selector, Services,
    SnapshotSource, SystemClock, list_processes,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Exit status of a run stopped by the log size bound.
const EXIT_LOG_BOUND: u8 = 2;

/// Print the process table the way `procwatch list` shows it.
pub fn print_process_table(source: &dyn SnapshotSource, out: &mut impl Write) -> anyhow::Result<()> {
    let rows = list_processes(source).context("failed to enumerate processes")?;
    writeln!(out, "Currently running processes:")?;
    writeln!(out, "-----------------------------------")?;
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

pub fn list() -> anyhow::Result<ExitCode> {
    let source = ProcfsSource::default();
    print_process_table(&source, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

pub async fn watch(mut config: Config, args: WatchArgs) -> anyhow::Result<ExitCode> {
    args.apply(&mut config);
    config.validate()?;
    if config.target.names.is_empty() {
        bail!("no target names configured; pass them as arguments or set `names` in [target]");
    }
    debug!(?config, "effective configuration");

    let sink = FileSink::open(&config.log.path)?;
    let services = Services {
        source: Box::new(ProcfsSource::new(config.monitor.socket_scope)),
        sink: Box::new(sink),
        clock: Box::new(SystemClock),
    };

    let cancel = CancellationToken::new();
    let signal_handle = tokio::spawn(cancel_on_signal(cancel.clone()));

    let mut selector: Box<dyn Selector> = match (args.pid, args.first) {
        (Some(pid), _) => Box::new(ByPid(pid)),
        (None, true) => Box::new(FirstMatch),
        (None, false) => Box::new(PromptSelector::new(io::stdin().lock(), io::stdout())),
    };

    let outcome = Observer::new(config, services)
        .run(selector.as_mut(), cancel.clone())
        .await;

    cancel.cancel();
    signal_handle.await??;

    Ok(exit_code(&outcome?, &mut io::stdout().lock())?)
}

fn exit_code(outcome: &RunOutcome, out: &mut impl Write) -> io::Result<ExitCode> {
    match outcome {
        RunOutcome::NothingToMonitor => {
            writeln!(out, "No discoverable processes match the configured targets.")?;
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Declined => {
            writeln!(out, "Nothing selected, exiting.")?;
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Exited(target) => {
            info!(%target, "target exited");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Interrupted(target) => {
            info!(%target, "monitoring interrupted");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Terminated {
            target,
            written,
            limit,
        } => {
            error!(%target, written, limit, "log size bound reached");
            Ok(ExitCode::from(EXIT_LOG_BOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor::{Error, Pid, ProcessEntry, ProcessStatus, Snapshot, Target};

    struct StaticTable;

    impl SnapshotSource for StaticTable {
        fn pids(&self) -> Result<Vec<Pid>, Error> {
            Ok(vec![Pid::new(1).unwrap(), Pid::new(42).unwrap()])
        }

        fn describe(&self, pid: Pid) -> Option<ProcessEntry> {
            (pid.get() == 1).then(|| ProcessEntry {
                pid,
                name: Some("systemd".into()),
                status: ProcessStatus::Sleeping,
            })
        }

        fn is_alive(&self, _pid: Pid) -> bool {
            true
        }

        fn sample(&mut self, _pid: Pid) -> Option<Snapshot> {
            None
        }
    }

    #[test]
    fn process_table_matches_listing_format() {
        let mut out = Vec::new();
        print_process_table(&StaticTable, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Currently running processes:\n\
             -----------------------------------\n\
             PID: 1, Name: systemd, State: Sleeping\n\
             PID: 42, Name: Unknown, State: Unknown\n"
        );
    }

    #[test]
    fn only_log_bound_is_a_failure_status() {
        let target = Target {
            pid: Pid::new(3).unwrap(),
            name: "app".into(),
        };
        let mut out = Vec::new();
        for outcome in [
            RunOutcome::NothingToMonitor,
            RunOutcome::Declined,
            RunOutcome::Exited(target.clone()),
            RunOutcome::Interrupted(target.clone()),
        ] {
            assert_eq!(exit_code(&outcome, &mut out).unwrap(), ExitCode::SUCCESS);
        }
        let terminated = RunOutcome::Terminated {
            target,
            written: 10,
            limit: 5,
        };
        assert_eq!(
            exit_code(&terminated, &mut out).unwrap(),
            ExitCode::from(EXIT_LOG_BOUND)
        );
    }
}
