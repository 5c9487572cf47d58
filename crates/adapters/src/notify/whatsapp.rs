// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! WhatsApp Cloud API notifier.
//!
//! Sends plain-text messages through the Meta Graph API. Without
//! credentials the notifier stays constructible so a daemon can run
//! end to end with delivery disabled.

use async_trait::async_trait;
use pulso_core::Channel;
use serde::Deserialize;

use super::{NotifyAdapter, NotifyError, OutboundMessage};

const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v17.0";

/// Credentials for the WhatsApp Cloud API.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppCredentials {
    pub access_token: String,
    pub phone_number_id: String,
}

/// Notifier backed by the WhatsApp Cloud API.
#[derive(Debug, Clone, Default)]
pub struct WhatsAppNotifier {
    credentials: Option<WhatsAppCredentials>,
    api_base: String,
}

impl WhatsAppNotifier {
    pub fn new(credentials: Option<WhatsAppCredentials>) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl NotifyAdapter for WhatsAppNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        if message.channel != Channel::Whatsapp {
            return Err(NotifyError::UnsupportedChannel(message.channel.to_string()));
        }
        let Some(credentials) = &self.credentials else {
            tracing::warn!(to = %message.to, "whatsapp credentials missing, message dropped");
            return Err(NotifyError::NotConfigured);
        };

        // The Graph API expects the phone number without the leading '+'.
        let to = message.to.trim_start_matches('+').to_string();
        let url = format!("{}/{}/messages", self.api_base, credentials.phone_number_id);
        let token = credentials.access_token.clone();
        let body = message.body.clone();

        // ureq is blocking, keep it off the tick loop's runtime thread.
        let result = tokio::task::spawn_blocking(move || {
            let payload = serde_json::json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "text",
                "text": { "body": body },
            });
            ureq::post(&url)
                .header("Authorization", &format!("Bearer {token}"))
                .send_json(&payload)
        })
        .await
        .map_err(|e| NotifyError::Failed(e.to_string()))?;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if status >= 300 {
                    return Err(NotifyError::Rejected { status });
                }
                Ok(())
            }
            Err(ureq::Error::StatusCode(status)) => Err(NotifyError::Rejected { status }),
            Err(e) => Err(NotifyError::Failed(e.to_string())),
        }
    }
}
