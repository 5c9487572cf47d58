// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pulso sequence engine: the tick that fires rules, spawns SOP
//! executions, and raises the escalation cascade

mod config;
mod engine;
mod error;
mod escalation;
mod evaluator;
mod spawner;

pub use config::EngineConfig;
pub use engine::{Engine, EngineDeps, TickReport};
pub use error::TickError;
pub use spawner::DEFAULT_ESTIMATED_MINUTES;
