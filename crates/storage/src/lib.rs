// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! File and memory persistence for executions and audit alerts
//!
//! The execution store is treated as external: every mutation that has
//! to be safe under overlapping ticks is expressed as a conditional
//! store operation, never as an in-process lock in the engine.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod alerts;
pub mod json;
pub mod memory;
pub mod store;

pub use alerts::{AlertLogError, AlertSink, FileAlertLog, MemoryAlertLog};
pub use json::JsonExecutionStore;
pub use memory::MemoryExecutionStore;
pub use store::{CasOutcome, ExecutionStore, InsertOutcome, StoreError};
