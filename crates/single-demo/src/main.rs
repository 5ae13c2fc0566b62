//! `single-demo` binary: run the default-if-empty pipeline from the command line

use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use single_core::TracingSink;
use single_demo::{init_tracing, run, run_spawned, DemoConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("single-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run a single value through a default-if-empty pipeline")
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with value, fallback and log_filter"),
        )
        .arg(
            Arg::new("value")
                .long("value")
                .help("Upstream value; omit to exercise the fallback"),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .help("Value substituted when the upstream is empty"),
        )
        .arg(
            Arg::new("log-filter")
                .long("log-filter")
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("spawn")
                .long("spawn")
                .action(ArgAction::SetTrue)
                .help("Activate on the tokio runtime instead of the main thread"),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => DemoConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => DemoConfig::new(),
    };
    if let Some(value) = matches.get_one::<String>("value") {
        config = config.with_value(Some(value.clone()));
    }
    if let Some(fallback) = matches.get_one::<String>("fallback") {
        config = config.with_fallback(fallback.clone());
    }
    if let Some(filter) = matches.get_one::<String>("log-filter") {
        config = config.with_log_filter(filter.clone());
    }

    init_tracing(&config.log_filter)?;

    if matches.get_flag("spawn") {
        run_spawned(&config, TracingSink).await?;
    } else {
        run(&config, TracingSink);
    }

    Ok(())
}
