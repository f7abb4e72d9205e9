//! Error types for auto-approve-safe
//!
//! None of these ever reach the host as a crash: the binary downgrades
//! every failure to a warning plus a neutral (`ask`) or default outcome.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a single rule file
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rule file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse rule file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to load the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to append a decision record
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to open audit log {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write audit record: {0}")]
    Write(#[from] io::Error),

    #[error("failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),
}
