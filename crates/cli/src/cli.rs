use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use config::{Config, ConnectionReport};
use monitor::Pid;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// procwatch: follow a process from discovery to exit
///
/// procwatch finds running processes whose name matches a list of targets,
/// lets you pick one and appends its memory usage, network connections and
/// lifecycle events to an audit log until it exits.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// If not provided, the default locations are checked. They are
    /// `/etc/procwatch/config.toml` and `/etc/procwatch/config.d/*.toml`,
    /// where the latter being a glob pattern. If they don't exist, the default
    /// configuration is used.
    #[arg(short, long, global = true, value_parser = validate_file)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Discover target processes, pick one and log its activity until it
    /// exits.
    Watch(WatchArgs),

    /// Print every running process with its name and state.
    List,
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    /// Target name substrings. Replace the configured list when given.
    pub names: Vec<String>,

    /// Seconds between two samples.
    #[arg(short, long, value_parser = validate_interval)]
    pub interval: Option<Duration>,

    /// Audit log file.
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Stop with a non-zero status once this many bytes were logged.
    #[arg(long, value_parser = validate_bound)]
    pub max_log_bytes: Option<u64>,

    /// How connection changes are logged.
    #[arg(long, value_enum)]
    pub report: Option<ReportMode>,

    /// Monitor this pid without prompting. It must match a target name.
    #[arg(long, value_parser = validate_pid, conflicts_with = "first")]
    pub pid: Option<Pid>,

    /// Monitor the first discovered process without prompting.
    #[arg(long)]
    pub first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Summary,
    Detailed,
}

impl From<ReportMode> for ConnectionReport {
    fn from(mode: ReportMode) -> Self {
        match mode {
            ReportMode::Summary => ConnectionReport::Summary,
            ReportMode::Detailed => ConnectionReport::Detailed,
        }
    }
}

impl WatchArgs {
    /// Command line values take precedence over the configuration files.
    pub fn apply(&self, config: &mut Config) {
        if !self.names.is_empty() {
            config.target.names = self.names.clone();
        }
        if let Some(interval) = self.interval {
            config.monitor.interval = interval;
        }
        if let Some(log) = &self.log {
            config.log.path = log.clone();
        }
        if let Some(max_bytes) = self.max_log_bytes {
            config.log.max_bytes = max_bytes;
        }
        if let Some(report) = self.report {
            config.monitor.connection_report = report.into();
        }
        config.apply_defaults();
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

/// Whole seconds, at least one.
#[inline(always)]
fn validate_interval(secs: &str) -> Result<Duration, String> {
    let secs: u64 = secs
        .parse()
        .map_err(|_| format!("`{secs}` is not a valid number of seconds"))?;
    if secs == 0 {
        Err("Interval must be at least one second".to_string())
    } else {
        Ok(Duration::from_secs(secs))
    }
}

#[inline(always)]
fn validate_bound(bytes: &str) -> Result<u64, String> {
    match bytes.parse::<u64>() {
        Ok(0) => Err("Log size bound must be greater than zero".to_string()),
        Ok(bytes) => Ok(bytes),
        Err(_) => Err(format!("`{bytes}` is not a valid byte count")),
    }
}

#[inline(always)]
fn validate_pid(pid: &str) -> Result<Pid, String> {
    pid.parse::<i32>()
        .ok()
        .and_then(Pid::new)
        .ok_or_else(|| format!("`{pid}` is not a valid pid"))
}
