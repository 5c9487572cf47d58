//! Behavioral specifications for the Pulso engine.
//!
//! These tests drive whole ticks through the public crate APIs with fake
//! adapters and assert on spawned executions, the escalation cascade, and
//! the audit trail.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// engine/
#[path = "specs/engine/escalation.rs"]
mod engine_escalation;
#[path = "specs/engine/gating.rs"]
mod engine_gating;
#[path = "specs/engine/spawning.rs"]
mod engine_spawning;

// storage/
#[path = "specs/storage/audit.rs"]
mod storage_audit;
