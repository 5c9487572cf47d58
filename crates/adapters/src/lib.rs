// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: rule and roster files, metric snapshots,
//! shift calendars, and the notification gateway

pub mod directory;
pub mod metrics;
pub mod notify;
pub mod rules;
pub mod shifts;
pub mod traced;

pub use directory::{DirectoryAdapter, RosterDirectory};
pub use metrics::{JsonMetricAdapter, MetricAdapter};
pub use notify::{NoOpNotifyAdapter, NotifyAdapter, OutboundMessage, WhatsAppNotifier};
pub use rules::{RuleStore, TomlRuleStore};
pub use shifts::{FixedShiftCalendar, ShiftBoundary, ShiftCalendar, ShiftWindow};
pub use traced::TracedNotifyAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use directory::FakeDirectory;
#[cfg(any(test, feature = "test-support"))]
pub use metrics::FakeMetricAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use rules::FakeRuleStore;
#[cfg(any(test, feature = "test-support"))]
pub use shifts::FakeShiftCalendar;
