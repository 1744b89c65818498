//! Entry point for the livetop TUI. Parses args, resolves config and runs the App.

use anyhow::Context;
use std::{env, fs::OpenOptions, path::Path, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

use livetop::app::App;
use livetop::cli::{parse_args, ArgsError};
use livetop::config::{config_path, load_config, save_config};
use livetop::metrics::SysinfoSource;

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    // LIVETOP_LOG controls verbosity (default: warn)
    let filter = EnvFilter::try_from_env("LIVETOP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgsError::Help(usage)) => {
            eprintln!("{usage}");
            return Ok(());
        }
        Err(ArgsError::Invalid(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let path = parsed.config.clone().unwrap_or_else(config_path);
    let file_cfg = load_config(&path)?;
    let mut cfg = file_cfg.clone();
    parsed.apply(&mut cfg);

    if parsed.save && cfg != file_cfg {
        save_config(&path, &cfg)?;
    }

    init_logging(cfg.log_file.as_deref())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %path.display(),
        regression = %cfg.regression,
        marker = %cfg.marker,
        dry_run = parsed.dry_run,
        "livetop starting"
    );

    if parsed.dry_run {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let mut app = App::new(SysinfoSource::new(), &cfg);
    let res = app.run().await;

    let stats = app.stats();
    info!(
        ticks = stats.ticks,
        stale_reads = stats.stale_reads,
        regressions = stats.regressions,
        "livetop exiting"
    );
    res.context("livetop stopped with an error")
}
