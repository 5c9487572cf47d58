// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Engine tuning knobs

use pulso_core::EscalationPolicies;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window inside which a rule re-firing for the same actor is
    /// suppressed instead of spawning a second execution
    #[serde(with = "humantime_serde")]
    pub dedup_window: Duration,
    /// Base URL for the completion link appended to assignment
    /// messages; None leaves the link out
    pub completion_base_url: Option<String>,
    /// Stored escalation policies; empty uses the built-in cascade
    pub policies: EscalationPolicies,
    /// Assignment message template
    pub assignment_template: String,
}

impl EngineConfig {
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn with_completion_base_url(mut self, base: impl Into<String>) -> Self {
        self.completion_base_url = Some(base.into());
        self
    }

    pub fn with_policies(mut self, policies: EscalationPolicies) -> Self {
        self.policies = policies;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dedup_window: Duration::from_secs(30 * 60),
            completion_base_url: None,
            policies: EscalationPolicies::default(),
            assignment_template: default_assignment_template(),
        }
    }
}

fn default_assignment_template() -> String {
    "📋 Nuevo SOP asignado: {nombre_sop}\n\n⏰ Tiempo estimado: {minutos} min".to_string()
}
