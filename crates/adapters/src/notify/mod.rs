// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Notification gateway port and its backends

use async_trait::async_trait;
use pulso_core::Channel;
use thiserror::Error;

mod noop;
mod whatsapp;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use noop::NoOpNotifyAdapter;
pub use whatsapp::{WhatsAppCredentials, WhatsAppNotifier};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("gateway not configured")]
    NotConfigured,
    #[error("channel not supported by this gateway: {0}")]
    UnsupportedChannel(String),
    #[error("delivery failed: {0}")]
    Failed(String),
    #[error("gateway rejected the message: status {status}")]
    Rejected { status: u16 },
}

/// An outbound notification addressed to one recipient.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub channel: Channel,
    pub to: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(channel: Channel, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            channel,
            to: to.into(),
            body: body.into(),
        }
    }

    pub fn whatsapp(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Channel::Whatsapp, to, body)
    }
}

/// Adapter trait for notification delivery
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Deliver one message to one recipient address.
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}
