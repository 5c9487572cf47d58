// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Pulso Daemon (pulsod)
//!
//! Background process that ticks the automation engine: fires due
//! rules, spawns SOP executions, and raises the escalation cascade.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod lifecycle;

use std::ffi::OsStr;
use std::path::Path;

use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() > 1 {
        Config::load(Path::new(&args[1]))?
    } else {
        Config::for_dir(&std::env::current_dir()?)
    };

    let _log_guard = setup_logging(&config)?;

    // The lock file must stay alive for the daemon's lifetime
    let _lock = lifecycle::acquire_lock(&config)?;
    let engine = lifecycle::build_engine(&config)?;

    info!(
        interval = ?config.tick_interval,
        rules = %config.rules_path.display(),
        "pulsod started"
    );

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut ticks = tokio::time::interval(config.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                // A failed tick is retried on the next interval
                if let Err(e) = engine.run_tick().await {
                    error!("tick failed: {}", e);
                }
            }

            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }

            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    info!("daemon stopped");
    Ok(())
}

/// Log to the configured file, or stderr when no file is set
///
/// The returned guard flushes the non-blocking writer on drop.
fn setup_logging(
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = &config.log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = log_path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("pulsod.log"))
        .to_os_string();
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}
