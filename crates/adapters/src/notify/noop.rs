// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! No-op notification adapter

use async_trait::async_trait;

use super::{NotifyAdapter, NotifyError, OutboundMessage};

/// Notification adapter that logs and discards every message.
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        tracing::debug!(channel = %message.channel, to = %message.to, "notification discarded");
        Ok(())
    }
}
