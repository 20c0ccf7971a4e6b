use clap::Parser;
use config::Config;
use procwatch::cli::{Cli, Command};
use procwatch::commands;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, trace};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // NOTE: The verbosity flag takes precedence over the environment variable
    // for log control. `PROCWATCH_LOG` can only set the level per crate, e.g.
    // `PROCWATCH_LOG=monitor=trace procwatch -v watch nginx` traces the core
    // while everything else logs at the info level.
    let env_filter = EnvFilter::builder()
        .with_env_var("PROCWATCH_LOG")
        .from_env()?
        .add_directive(cli.verbosity.log_level_filter().as_str().parse()?);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_multiple(default_config_files()?)?,
    };
    debug!(?config, ?cli);

    match cli.command {
        Command::List => commands::list(),
        Command::Watch(args) => commands::watch(config, args).await,
    }
}

const CONFIG_FILE: &str = "/etc/procwatch/config.toml";
const CONFIG_DROP_INS: &str = "/etc/procwatch/config.d/*.toml";

/// The main file first, then drop-ins in glob order so later ones win.
fn default_config_files() -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = std::iter::once(PathBuf::from(CONFIG_FILE))
        .chain(glob::glob(CONFIG_DROP_INS)?.filter_map(Result::ok))
        .collect();
    trace!(?files, "config file candidates");
    Ok(files)
}
