// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Escalation cascade configuration
//!
//! A policy is an ordered list of tiers. An unresolved execution is
//! classified at the highest enabled tier whose threshold has elapsed,
//! inclusive: at exactly `after_minutes` the tier applies. Intermediate
//! tiers that were never observed by a tick are skipped, not replayed.

use crate::actor::RoleName;
use crate::rule::SopId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Delivery channel for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Whatsapp,
    Email,
    Sms,
    Phone,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Phone => "phone",
        };
        write!(f, "{}", name)
    }
}

/// One tier of the cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationLevel {
    pub level: u32,
    /// Minutes after spawn at which this tier applies
    pub after_minutes: u32,
    pub notify_roles: Vec<RoleName>,
    pub channels: Vec<Channel>,
    /// Message template; placeholders like {nombre_sop} are substituted
    pub message: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// An ordered cascade of escalation tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    pub levels: Vec<EscalationLevel>,
}

impl EscalationPolicy {
    pub fn new(levels: Vec<EscalationLevel>) -> Self {
        Self { levels }
    }

    /// The shipped three-tier cascade used when nothing else applies
    pub fn default_policy() -> Self {
        Self::new(vec![
            EscalationLevel {
                level: 1,
                after_minutes: 5,
                notify_roles: vec![RoleName::from("empleado_asignado")],
                channels: vec![Channel::Whatsapp],
                message: "⏰ ¡Recuerda completar tu SOP! {nombre_sop}".to_string(),
                enabled: true,
            },
            EscalationLevel {
                level: 2,
                after_minutes: 15,
                notify_roles: vec![
                    RoleName::from("supervisor"),
                    RoleName::from("gerente_sucursal"),
                ],
                channels: vec![Channel::Whatsapp, Channel::Email],
                message: "⚠️ El SOP '{nombre_sop}' aún no se ha completado. Asignado a ti."
                    .to_string(),
                enabled: true,
            },
            EscalationLevel {
                level: 3,
                after_minutes: 30,
                notify_roles: vec![
                    RoleName::from("gerente_general"),
                    RoleName::from("gerente_regional"),
                ],
                channels: vec![Channel::Whatsapp, Channel::Email, Channel::Phone],
                message: "🚨 URGENTE: SOP '{nombre_sop}' pendiente en {sucursal_name}. \
                          No se ha completado tras {minutos} minutos."
                    .to_string(),
                enabled: true,
            },
        ])
    }

    /// Thresholds must strictly increase across tiers
    pub fn validate(&self) -> Result<(), PolicyError> {
        let mut previous: Option<u32> = None;
        for tier in &self.levels {
            if let Some(prev) = previous {
                if tier.after_minutes <= prev {
                    return Err(PolicyError::NonIncreasingThreshold {
                        level: tier.level,
                        after_minutes: tier.after_minutes,
                        previous: prev,
                    });
                }
            }
            previous = Some(tier.after_minutes);
        }
        Ok(())
    }

    /// Highest enabled tier whose threshold has elapsed
    pub fn level_for(&self, minutes_elapsed: u32) -> Option<&EscalationLevel> {
        self.levels
            .iter()
            .filter(|tier| tier.enabled && tier.after_minutes <= minutes_elapsed)
            .max_by_key(|tier| tier.after_minutes)
    }

    /// Lowest enabled threshold, the point before which no execution
    /// needs to enter the sweep
    pub fn min_threshold(&self) -> Option<u32> {
        self.levels
            .iter()
            .filter(|tier| tier.enabled)
            .map(|tier| tier.after_minutes)
            .min()
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}

/// Stored policies: an optional replacement default plus per-SOP overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicies {
    #[serde(default)]
    pub default: Option<EscalationPolicy>,
    #[serde(default)]
    pub per_sop: HashMap<String, EscalationPolicy>,
}

impl EscalationPolicies {
    /// Per-SOP override, else the stored default, else the built-in cascade
    pub fn for_sop(&self, sop: &SopId) -> EscalationPolicy {
        if let Some(policy) = self.per_sop.get(&sop.0) {
            return policy.clone();
        }
        if let Some(policy) = &self.default {
            return policy.clone();
        }
        EscalationPolicy::default_policy()
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if let Some(policy) = &self.default {
            policy.validate()?;
        }
        for policy in self.per_sop.values() {
            policy.validate()?;
        }
        Ok(())
    }

    /// Lowest enabled threshold across every policy that could apply
    pub fn min_threshold(&self) -> Option<u32> {
        let base = self
            .default
            .as_ref()
            .map(|p| p.min_threshold())
            .unwrap_or_else(|| EscalationPolicy::default_policy().min_threshold());
        self.per_sop
            .values()
            .map(|p| p.min_threshold())
            .chain(std::iter::once(base))
            .flatten()
            .min()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("level {level} threshold {after_minutes}m does not exceed previous {previous}m")]
    NonIncreasingThreshold {
        level: u32,
        after_minutes: u32,
        previous: u32,
    },
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
