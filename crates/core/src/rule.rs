// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Automation rules: trigger policies that spawn SOP executions

use crate::actor::{BranchId, RoleName};
use crate::condition::MetricCondition;
use crate::time::{TriggerTime, Weekday};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique rule identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        RuleId(s)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        RuleId(s.to_string())
    }
}

/// Identifier of the SOP a rule spawns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SopId(pub String);

impl fmt::Display for SopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SopId {
    fn from(s: String) -> Self {
        SopId(s)
    }
}

impl From<&str> for SopId {
    fn from(s: &str) -> Self {
        SopId(s.to_string())
    }
}

/// Rule priority as shown on the operations dashboard
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Shift boundary moment for shift-based triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMoment {
    ShiftStart,
    ShiftMiddle,
    ShiftEnd,
}

impl fmt::Display for ShiftMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftMoment::ShiftStart => "shift_start",
            ShiftMoment::ShiftMiddle => "shift_middle",
            ShiftMoment::ShiftEnd => "shift_end",
        };
        write!(f, "{}", name)
    }
}

/// When a rule fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleTrigger {
    /// Fire when the tick lands on one of the times, on one of the days
    TimeBased {
        trigger_times: Vec<TriggerTime>,
        days: Vec<Weekday>,
    },
    /// Fire while a live metric satisfies the condition
    EventBased { condition: MetricCondition },
    /// Fire when a named shift reaches the given boundary moment
    ShiftBased {
        shifts: Vec<String>,
        moment: ShiftMoment,
    },
}

impl RuleTrigger {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RuleTrigger::TimeBased { .. } => "time_based",
            RuleTrigger::EventBased { .. } => "event_based",
            RuleTrigger::ShiftBased { .. } => "shift_based",
        }
    }
}

/// A trigger policy read from the rule store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    /// Display name of the SOP this rule spawns, shown in notifications
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: Priority,
    pub sop_id: SopId,
    pub assign_to_roles: Vec<RoleName>,
    /// Restrict the rule to one branch; None applies wherever the
    /// assignees work
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    /// Minutes an assignee is expected to need
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(flatten)]
    pub trigger: RuleTrigger,
}

fn default_active() -> bool {
    true
}

impl Rule {
    pub fn new(
        id: impl Into<RuleId>,
        description: impl Into<String>,
        sop_id: impl Into<SopId>,
        trigger: RuleTrigger,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            active: true,
            priority: Priority::default(),
            sop_id: sop_id.into(),
            assign_to_roles: Vec::new(),
            branch_id: None,
            estimated_minutes: None,
            trigger,
        }
    }

    pub fn assign_to(mut self, roles: Vec<RoleName>) -> Self {
        self.assign_to_roles = roles;
        self
    }

    pub fn for_branch(mut self, branch: impl Into<BranchId>) -> Self {
        self.branch_id = Some(branch.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.active = false;
        self
    }

    /// Rules missing assignees or trigger inputs never fire; they are
    /// skipped, not treated as errors
    pub fn is_well_formed(&self) -> bool {
        if self.assign_to_roles.is_empty() {
            return false;
        }
        match &self.trigger {
            RuleTrigger::TimeBased { trigger_times, .. } => !trigger_times.is_empty(),
            RuleTrigger::EventBased { condition } => !condition.metric.is_empty(),
            RuleTrigger::ShiftBased { shifts, .. } => !shifts.is_empty(),
        }
    }

    /// Time gate for time-based rules; other trigger kinds never match here
    pub fn fires_at(&self, t: &DateTime<Utc>) -> bool {
        match &self.trigger {
            RuleTrigger::TimeBased {
                trigger_times,
                days,
            } => {
                days.contains(&Weekday::from_datetime(t))
                    && trigger_times.iter().any(|time| time.matches(t))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
