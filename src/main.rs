//! SelectorLab - locator derivation and verification pipeline.
//!
//! Main entry point for the SelectorLab CLI.

mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::OnceLock;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use selectorlab_config::{Config, ConfigLoader, ConfigValidator, parse_flag};

use crate::cli::Cli;

/// Get the .selectorlab directory path.
fn selectorlab_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".selectorlab"))
        .unwrap_or_else(|| PathBuf::from(".selectorlab"))
}

/// Daily-rotated file writer under ~/.selectorlab/logs/.
fn file_writer() -> Result<NonBlocking, Box<dyn std::error::Error>> {
    let log_dir = selectorlab_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("selectorlab")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file on drop; keep it for the whole run.
    static GUARD: OnceLock<WorkerGuard> = OnceLock::new();
    let _ = GUARD.set(guard);

    Ok(non_blocking)
}

/// Initialize tracing with console output on stderr and optional file output.
///
/// stdout is reserved for command results.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, file_error) = match file_writer() {
        Ok(writer) => (Some(fmt::layer().with_writer(writer).with_ansi(false)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(error) = file_error {
        warn!("File logging disabled: {}", error);
    }
}

/// File, then environment, then command-line flags.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    ConfigLoader::apply_env_overrides(&mut config)?;

    if let Some(url) = &cli.endpoint_url {
        config.assistant.endpoint_url = url.clone();
    }
    if let Some(raw) = &cli.mock_mode {
        config.assistant.mock_mode = parse_flag(raw).map_err(anyhow::Error::msg)?;
    }

    for warning in ConfigValidator::validate(&config).into_error()? {
        warn!("{}: {}", warning.path, warning.message);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    commands::run(cli.command, &config).await
}
