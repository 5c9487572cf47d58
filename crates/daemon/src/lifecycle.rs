// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Daemon lifecycle: single-instance lock and engine wiring

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;
use pulso_adapters::notify::WhatsAppNotifier;
use pulso_adapters::{
    FixedShiftCalendar, JsonMetricAdapter, RosterDirectory, TomlRuleStore, TracedNotifyAdapter,
};
use pulso_core::{SystemClock, UuidIdGen};
use pulso_engine::{Engine, EngineDeps};
use pulso_storage::{FileAlertLog, JsonExecutionStore};
use thiserror::Error;

use crate::config::Config;

/// Engine with the production adapter set (notifier wrapped with tracing)
pub type DaemonEngine = Engine<
    TomlRuleStore,
    JsonExecutionStore,
    RosterDirectory,
    JsonMetricAdapter,
    FixedShiftCalendar,
    TracedNotifyAdapter<WhatsAppNotifier>,
    FileAlertLog,
    SystemClock,
    UuidIdGen,
>;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to acquire pid lock {path}: is another pulsod running?")]
    Locked {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("execution store: {0}")]
    Store(#[from] pulso_storage::StoreError),

    #[error("alert log: {0}")]
    Alerts(#[from] pulso_storage::AlertLogError),
}

/// Acquire the exclusive pid lock under the state directory
///
/// The returned file holds the lock for the daemon's lifetime and
/// releases it on drop.
pub fn acquire_lock(config: &Config) -> Result<File, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;
    let path = config.state_dir.join("pulsod.pid");
    let mut file = File::create(&path)?;
    file.try_lock_exclusive()
        .map_err(|source| LifecycleError::Locked { path, source })?;
    writeln!(file, "{}", std::process::id())?;
    Ok(file)
}

/// Wire the production engine from configuration
pub fn build_engine(config: &Config) -> Result<DaemonEngine, LifecycleError> {
    let executions = JsonExecutionStore::open(&config.state_dir)?;
    let alerts = FileAlertLog::open(&config.alerts_path)?;
    let notify = TracedNotifyAdapter::new(WhatsAppNotifier::new(config.whatsapp.clone()));

    Ok(Engine::new(
        EngineDeps {
            rules: TomlRuleStore::new(&config.rules_path),
            executions,
            directory: RosterDirectory::new(&config.roster_path),
            metrics: JsonMetricAdapter::new(&config.metrics_path),
            shifts: FixedShiftCalendar::new(config.shifts.clone()),
            notify,
            alerts,
        },
        config.engine.clone(),
        SystemClock,
        UuidIdGen,
    ))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
