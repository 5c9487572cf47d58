// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Traced adapter wrappers for consistent observability

use async_trait::async_trait;

use crate::notify::{NotifyAdapter, NotifyError, OutboundMessage};

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", channel = %message.channel, to = %message.to);
        let _guard = span.enter();

        tracing::debug!(body_len = message.body.len(), "sending");

        let start = std::time::Instant::now();
        let result = self.inner.send(message).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "delivery failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
