// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Daemon configuration
//!
//! One TOML file names the rule, roster, and metric files, the state
//! directory, and the engine tuning knobs. Relative paths are resolved
//! against the config file's directory so a deployment can be moved
//! wholesale.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pulso_adapters::notify::WhatsAppCredentials;
use pulso_adapters::ShiftWindow;
use pulso_engine::EngineConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("escalation policy: {0}")]
    Policy(#[from] pulso_core::escalation::PolicyError),
}

/// Daemon configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How often the engine ticks
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    /// TOML file of automation rules
    pub rules_path: PathBuf,
    /// TOML roster of branches and staff
    pub roster_path: PathBuf,
    /// JSON snapshot of live metrics
    pub metrics_path: PathBuf,
    /// Directory holding the execution store and the pid lock
    pub state_dir: PathBuf,
    /// Append-only audit log of notification attempts
    pub alerts_path: PathBuf,
    /// Daemon log file; logs go to stderr when unset
    pub log_path: Option<PathBuf>,
    /// WhatsApp Cloud API credentials; without them sends are declined
    /// and audited as attempted
    pub whatsapp: Option<WhatsAppCredentials>,
    /// Shift windows for shift-based rules
    pub shifts: Vec<ShiftWindow>,
    /// Engine tuning
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(60),
            rules_path: PathBuf::from("rules.toml"),
            roster_path: PathBuf::from("roster.toml"),
            metrics_path: PathBuf::from("metrics.json"),
            state_dir: PathBuf::from("state"),
            alerts_path: PathBuf::from("state/alerts.log"),
            log_path: None,
            whatsapp: None,
            shifts: Vec::new(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file and validate the escalation policies
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&raw)?;
        config.engine.policies.validate()?;
        config.resolve(path.parent().unwrap_or(Path::new(".")));
        Ok(config)
    }

    /// Defaults with every path anchored under the given directory
    pub fn for_dir(dir: &Path) -> Self {
        let mut config = Self::default();
        config.resolve(dir);
        config
    }

    fn resolve(&mut self, base: &Path) {
        for path in [
            &mut self.rules_path,
            &mut self.roster_path,
            &mut self.metrics_path,
            &mut self.state_dir,
            &mut self.alerts_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(path) = &mut self.log_path {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
