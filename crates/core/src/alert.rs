// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Append-only audit records for notification attempts
//!
//! Every notification the engine sends, or tries to send, produces one
//! record. The log format is one JSON entry per line with a CRC32
//! checksum so replay can skip corrupted lines.

use crate::actor::{ActorId, RoleName};
use crate::escalation::Channel;
use crate::execution::ExecutionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of notification the record audits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    SopAssigned,
    SopEscalation,
}

/// Whether the gateway accepted the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDelivery {
    /// The gateway accepted the message
    Delivered,
    /// Delivery was attempted but did not succeed
    Attempted,
}

/// One audited notification attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub kind: AlertKind,
    /// Cascade level; 0 for assignment notifications
    pub level: u32,
    pub message: String,
    pub recipient_id: ActorId,
    pub channel: Channel,
    pub execution_id: ExecutionId,
    pub delivery: AlertDelivery,
    /// Roles the tier intended to reach, kept for audit queries
    pub notify_roles: Vec<RoleName>,
    pub recorded_at: DateTime<Utc>,
}

/// A checksummed line in the alert log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub sequence: u64,
    pub record: AlertRecord,
    /// CRC32 of the serialized record
    pub checksum: u32,
}

impl AlertEntry {
    pub fn new(sequence: u64, record: AlertRecord) -> Self {
        let checksum = Self::checksum_of(&record);
        Self {
            sequence,
            record,
            checksum,
        }
    }

    fn checksum_of(record: &AlertRecord) -> u32 {
        // AlertRecord holds only strings, integers, and unit enums, so
        // serialization cannot fail
        let json = serde_json::to_string(record).unwrap_or_else(|_| String::new());
        crc32fast::hash(json.as_bytes())
    }

    /// Verify the entry against its checksum
    pub fn verify(&self) -> bool {
        self.checksum == Self::checksum_of(&self.record)
    }

    /// Serialize to a single log line
    pub fn to_line(&self) -> Result<String, AlertFormatError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an entry from a log line
    pub fn from_line(line: &str) -> Result<Self, AlertFormatError> {
        Ok(serde_json::from_str(line)?)
    }
}

#[derive(Debug, Error)]
pub enum AlertFormatError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
