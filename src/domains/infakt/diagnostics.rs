//! Diagnostics sinks for offline troubleshooting.
//!
//! The client reports normalized line items and failed calls to a
//! [`DiagnosticsSink`]. The default [`NopSink`] discards them; [`FileSink`]
//! appends one JSON object per line to a trace file. Write failures are
//! swallowed and never affect a tool response.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::core::config::DiagnosticsConfig;

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEvent {
    /// What was happening, e.g. `create_invoice` or `GET /invoices/1.json`.
    pub operation: String,
    /// Input or derived values worth keeping.
    pub detail: Value,
}

impl DiagnosticEvent {
    pub fn new(operation: impl Into<String>, detail: Value) -> Self {
        Self {
            operation: operation.into(),
            detail,
        }
    }
}

/// Receives diagnostic events from the API client.
pub trait DiagnosticsSink: Send + Sync + std::fmt::Debug {
    /// Record one event. Must not fail or block for long.
    fn record(&self, event: DiagnosticEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

impl DiagnosticsSink for NopSink {
    fn record(&self, _event: DiagnosticEvent) {}
}

/// Appends events as JSON lines to a file.
///
/// The file is opened on the first event and kept open. After a failed
/// write the handle is dropped and the next event opens the file again.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

#[derive(Serialize)]
struct TraceLine<'a> {
    timestamp: String,
    operation: &'a str,
    detail: &'a Value,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &DiagnosticEvent) -> std::io::Result<()> {
        let line = TraceLine {
            timestamp: Utc::now().to_rfc3339(),
            operation: &event.operation,
            detail: &event.detail,
        };
        let mut serialized = serde_json::to_string(&line)?;
        serialized.push('\n');

        let mut slot = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = match slot.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };

        file.write_all(serialized.as_bytes())?;
        *slot = Some(file);
        Ok(())
    }
}

impl DiagnosticsSink for FileSink {
    fn record(&self, event: DiagnosticEvent) {
        if let Err(e) = self.append(&event) {
            debug!("Dropping diagnostic event for {}: {}", event.operation, e);
        }
    }
}

/// Build the sink selected by configuration.
pub fn sink_from_config(config: &DiagnosticsConfig) -> Arc<dyn DiagnosticsSink> {
    match &config.trace_file {
        Some(path) => {
            info!("Diagnostics trace enabled: {}", path.display());
            Arc::new(FileSink::new(path.clone()))
        }
        None => Arc::new(NopSink),
    }
}
