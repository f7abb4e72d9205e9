//! JSONL audit logging for auto-approve-safe
//!
//! Appends one record per decision. Each invocation opens the file,
//! appends a single complete line and closes it again; concurrent hook
//! processes may interleave lines but never share a handle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::input::HookInput;
use crate::output::Verdict;

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub ts: DateTime<Utc>,

    /// Working directory of the hook process
    pub cwd: String,

    /// Tool that was invoked
    pub tool_name: String,

    /// "allow", "deny" or "ask"
    pub decision: &'static str,

    /// Reason for the decision
    pub reason: String,

    /// Redacted summary of the tool input
    pub input: Value,
}

impl AuditEntry {
    /// Create a new audit entry from input and verdict
    pub fn new(input: &HookInput, verdict: &Verdict) -> Self {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            ts: Utc::now(),
            cwd,
            tool_name: input.tool_name.clone(),
            decision: verdict.decision(),
            reason: verdict.reason().to_string(),
            input: input.summary(),
        }
    }
}

/// Audit logger
#[derive(Debug, Default)]
pub struct AuditLogger {
    path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` disables logging
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Append an audit entry
    pub fn log(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AuditError::Open {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Log a decision
    pub fn log_decision(&self, input: &HookInput, verdict: &Verdict) -> Result<(), AuditError> {
        self.log(&AuditEntry::new(input, verdict))
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }
}
