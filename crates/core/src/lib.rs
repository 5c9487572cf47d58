//! pulso-core: Core library for the Pulso sequence engine
//!
//! This crate provides:
//! - Domain types for rules, actors, and escalation policies
//! - A pure state machine for the execution lifecycle
//! - Clock and ID abstractions for deterministic tests
//! - Message templates and audit record formats

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod clock;
pub mod id;

// Domain types (order matters for dependencies)
pub mod time;
pub mod condition;
pub mod actor;
pub mod escalation;
pub mod rule;
pub mod execution;
pub mod effect;
pub mod template;
pub mod alert;

// Re-exports
pub use alert::{AlertDelivery, AlertEntry, AlertKind, AlertRecord};
pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::{Effect, Event};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};

pub use actor::{Actor, ActorId, BranchId, RoleName};
pub use condition::{CmpOp, MetricCondition};
pub use escalation::{Channel, EscalationLevel, EscalationPolicies, EscalationPolicy};
pub use execution::{Execution, ExecutionEvent, ExecutionId, ExecutionStatus};
pub use rule::{Priority, Rule, RuleId, RuleTrigger, ShiftMoment, SopId};
pub use template::TemplateVars;
pub use time::{TriggerTime, Weekday};
