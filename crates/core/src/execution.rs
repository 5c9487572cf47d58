// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Execution state machine
//!
//! An execution is one instance of a rule firing for one actor. It is
//! spawned pending, may be started and completed by the assignee, and
//! is escalated by the engine while it stays unresolved. Transitions
//! are pure functions returning the new state plus effects.

use crate::actor::{Actor, ActorId, BranchId};
use crate::clock::Clock;
use crate::effect::{Effect, Event};
use crate::rule::{Rule, RuleId, SopId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique execution identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub String);

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExecutionId {
    fn from(s: String) -> Self {
        ExecutionId(s)
    }
}

impl From<&str> for ExecutionId {
    fn from(s: &str) -> Self {
        ExecutionId(s.to_string())
    }
}

/// Lifecycle status of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
    Failed,
}

impl ExecutionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::InProgress => "in_progress",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Overdue => "overdue",
            ExecutionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExecutionStatus::Pending),
            "in_progress" => Ok(ExecutionStatus::InProgress),
            "completed" => Ok(ExecutionStatus::Completed),
            "overdue" => Ok(ExecutionStatus::Overdue),
            "failed" => Ok(ExecutionStatus::Failed),
            _ => Err(format!("unknown execution status: {}", s)),
        }
    }
}

/// Events that change an execution's lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    /// The assignee opened the SOP and began work
    Start,
    /// The assignee finished the SOP
    Complete,
    /// The SOP was abandoned or could not be done
    Fail { reason: String },
    /// The escalation sweep raised the cascade level
    Escalate { level: u32 },
}

/// One SOP assignment tracked to completion or escalation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,
    pub rule_id: RuleId,
    pub sop_id: SopId,
    pub actor_id: ActorId,
    pub branch_id: BranchId,
    pub status: ExecutionStatus,
    /// Highest cascade level already notified; 0 means none
    pub escalation_level: u32,
    /// Display fields denormalized at spawn so escalation messages
    /// render without re-querying the rule or the roster
    pub sop_name: String,
    pub actor_name: String,
    pub branch_name: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
}

impl Execution {
    /// Create a pending execution for one actor of a firing rule
    pub fn spawn(
        id: impl Into<ExecutionId>,
        rule: &Rule,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            rule_id: rule.id.clone(),
            sop_id: rule.sop_id.clone(),
            actor_id: actor.id.clone(),
            branch_id: actor.branch_id.clone(),
            status: ExecutionStatus::Pending,
            escalation_level: 0,
            sop_name: rule.description.clone(),
            actor_name: actor.name.clone(),
            branch_name: actor.branch_name.clone(),
            created_at: now,
            completed_at: None,
            failure_reason: None,
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: ExecutionEvent, clock: &impl Clock) -> (Execution, Vec<Effect>) {
        let now = clock.now();

        match (self.status, event) {
            (ExecutionStatus::Pending, ExecutionEvent::Start) => {
                let execution = Execution {
                    status: ExecutionStatus::InProgress,
                    ..self.clone()
                };
                let effects = vec![
                    Effect::PersistStatus,
                    Effect::Emit(Event::ExecutionStarted {
                        id: self.id.clone(),
                    }),
                ];
                (execution, effects)
            }

            // Any unresolved execution can complete, including overdue ones
            (
                ExecutionStatus::Pending | ExecutionStatus::InProgress | ExecutionStatus::Overdue,
                ExecutionEvent::Complete,
            ) => {
                let execution = Execution {
                    status: ExecutionStatus::Completed,
                    completed_at: Some(now),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::PersistStatus,
                    Effect::Emit(Event::ExecutionCompleted {
                        id: self.id.clone(),
                    }),
                ];
                (execution, effects)
            }

            (
                ExecutionStatus::Pending | ExecutionStatus::InProgress | ExecutionStatus::Overdue,
                ExecutionEvent::Fail { reason },
            ) => {
                let execution = Execution {
                    status: ExecutionStatus::Failed,
                    completed_at: Some(now),
                    failure_reason: Some(reason.clone()),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::PersistStatus,
                    Effect::Emit(Event::ExecutionFailed {
                        id: self.id.clone(),
                        reason,
                    }),
                ];
                (execution, effects)
            }

            // Escalation is monotonic; stale or repeated levels are no-ops.
            // Only a pending execution changes status on its first escalation.
            (
                ExecutionStatus::Pending | ExecutionStatus::InProgress | ExecutionStatus::Overdue,
                ExecutionEvent::Escalate { level },
            ) if level > self.escalation_level => {
                let status = if self.status == ExecutionStatus::Pending {
                    ExecutionStatus::Overdue
                } else {
                    self.status
                };
                let execution = Execution {
                    status,
                    escalation_level: level,
                    ..self.clone()
                };
                let effects = vec![
                    Effect::PersistEscalation {
                        prior_level: self.escalation_level,
                    },
                    Effect::Emit(Event::ExecutionEscalated {
                        id: self.id.clone(),
                        level,
                    }),
                ];
                (execution, effects)
            }

            // Invalid transitions - no change
            _ => (self.clone(), vec![]),
        }
    }

    /// Unresolved executions stay in the escalation sweep
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self.status,
            ExecutionStatus::Pending | ExecutionStatus::InProgress | ExecutionStatus::Overdue
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ExecutionStatus::Completed | ExecutionStatus::Failed
        )
    }

    /// Whole minutes since spawn, truncated toward zero
    pub fn minutes_elapsed(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = now.signed_duration_since(self.created_at);
        elapsed.num_minutes().max(0) as u32
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
