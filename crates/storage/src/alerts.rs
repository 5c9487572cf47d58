// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Append-only alert log
//!
//! One checksummed JSON entry per line. Replay skips lines that fail
//! verification so one torn write never poisons the whole audit trail.

use async_trait::async_trait;
use pulso_core::alert::{AlertEntry, AlertFormatError, AlertRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from alert log operations
#[derive(Debug, Error)]
pub enum AlertLogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("format error: {0}")]
    Format(#[from] AlertFormatError),
}

/// Sink for audit alert records
#[async_trait]
pub trait AlertSink: Clone + Send + Sync + 'static {
    /// Append one record; assigns the next sequence number
    async fn append(&self, record: AlertRecord) -> Result<(), AlertLogError>;
}

/// File-backed alert log
#[derive(Clone)]
pub struct FileAlertLog {
    path: PathBuf,
    next_sequence: Arc<Mutex<u64>>,
}

impl FileAlertLog {
    /// Open or create the log, resuming the sequence from existing entries
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AlertLogError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entries = Self::replay_path(&path)?;
        let next = entries.last().map(|e| e.sequence + 1).unwrap_or(1);
        Ok(Self {
            path,
            next_sequence: Arc::new(Mutex::new(next)),
        })
    }

    /// All verified entries in the log
    pub fn replay(&self) -> Result<Vec<AlertEntry>, AlertLogError> {
        Self::replay_path(&self.path)
    }

    fn replay_path(path: &Path) -> Result<Vec<AlertEntry>, AlertLogError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match AlertEntry::from_line(&line) {
                Ok(entry) if entry.verify() => entries.push(entry),
                Ok(entry) => {
                    tracing::warn!(sequence = entry.sequence, "alert entry failed checksum, skipping");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable alert entry, skipping");
                }
            }
        }
        Ok(entries)
    }
}

#[async_trait]
impl AlertSink for FileAlertLog {
    async fn append(&self, record: AlertRecord) -> Result<(), AlertLogError> {
        let mut sequence = self.next_sequence.lock().unwrap_or_else(|e| e.into_inner());

        let entry = AlertEntry::new(*sequence, record);
        let line = entry.to_line()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.sync_all()?;

        *sequence += 1;
        Ok(())
    }
}

/// In-memory sink for tests and dry runs
#[derive(Clone, Default)]
pub struct MemoryAlertLog {
    records: Arc<Mutex<Vec<AlertRecord>>>,
}

impl MemoryAlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded alerts in append order
    pub fn records(&self) -> Vec<AlertRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl AlertSink for MemoryAlertLog {
    async fn append(&self, record: AlertRecord) -> Result<(), AlertLogError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
        Ok(())
    }
}

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;
