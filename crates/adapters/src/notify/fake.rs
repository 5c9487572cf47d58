// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pulso_core::Channel;

use super::{NotifyAdapter, NotifyError, OutboundMessage};

/// Recorded notification
#[derive(Debug, Clone)]
pub struct NotifyCall {
    pub channel: Channel,
    pub to: String,
    pub body: String,
}

/// Fake notification adapter for testing
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    calls: Arc<Mutex<Vec<NotifyCall>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded send attempts, including failed ones.
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make every subsequent send fail after recording the attempt.
    pub fn fail_all(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(NotifyCall {
                channel: message.channel,
                to: message.to.clone(),
                body: message.body.clone(),
            });
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(NotifyError::Failed("injected".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
