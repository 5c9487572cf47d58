// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Effects and events produced by the execution state machine
//!
//! Transitions are pure; they return the new state plus a list of
//! effects for the engine to perform. Persistence effects carry the
//! discipline the store must apply, so overlap safety is decided in
//! one place instead of at every call site.

use crate::execution::ExecutionId;
use serde::{Deserialize, Serialize};

/// Side effects requested by state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit an event for observers
    Emit(Event),
    /// Persist the transitioned record with a plain write
    PersistStatus,
    /// Persist the transitioned record only if the stored escalation
    /// level still equals `prior_level`
    PersistEscalation { prior_level: u32 },
}

/// Events emitted by the engine and state machines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RuleFired {
        rule_id: String,
        trigger: String,
    },
    ExecutionSpawned {
        id: ExecutionId,
        rule_id: String,
        actor_id: String,
    },
    DuplicateSuppressed {
        rule_id: String,
        actor_id: String,
    },
    ExecutionStarted {
        id: ExecutionId,
    },
    ExecutionCompleted {
        id: ExecutionId,
    },
    ExecutionFailed {
        id: ExecutionId,
        reason: String,
    },
    ExecutionEscalated {
        id: ExecutionId,
        level: u32,
    },
    NotificationSent {
        recipient_id: String,
        channel: String,
    },
    NotificationFailed {
        recipient_id: String,
        channel: String,
        reason: String,
    },
    TickCompleted {
        spawned: usize,
        escalated: usize,
    },
}

impl Event {
    /// Event name for log filtering, "category:action"
    pub fn name(&self) -> String {
        match self {
            Event::RuleFired { .. } => "rule:fired".to_string(),
            Event::ExecutionSpawned { .. } => "execution:spawned".to_string(),
            Event::DuplicateSuppressed { .. } => "execution:duplicate".to_string(),
            Event::ExecutionStarted { .. } => "execution:started".to_string(),
            Event::ExecutionCompleted { .. } => "execution:completed".to_string(),
            Event::ExecutionFailed { .. } => "execution:failed".to_string(),
            Event::ExecutionEscalated { .. } => "execution:escalated".to_string(),
            Event::NotificationSent { .. } => "notify:sent".to_string(),
            Event::NotificationFailed { .. } => "notify:failed".to_string(),
            Event::TickCompleted { .. } => "tick:completed".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
