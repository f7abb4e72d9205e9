//! Configuration loading for auto-approve-safe
//!
//! Supports TOML configuration with embedded defaults. The settings file
//! only says where rules live and whether to keep an audit log; the
//! rules themselves are JSON (see [`crate::rules`]).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the project root
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable the decision audit log
    pub audit_log: bool,

    /// Path to the audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some(".claude/auto_approve_safe.decisions.jsonl".to_string()),
        }
    }
}

/// Rule source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule files, merged in order (earlier first)
    pub files: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            files: vec![
                "~/.claude/hooks/auto_approve_safe.rules.json".to_string(),
                ".claude/scripts/auto_approve_safe.rules.json".to_string(),
            ],
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub project_dir: PathBuf,
}

impl Config {
    /// Load configuration from the standard locations or use defaults.
    ///
    /// The first settings file found wins. One that exists but fails to
    /// load is reported and skipped.
    pub fn load() -> Self {
        let project_dir = Self::project_dir();
        let config_paths = [
            Some(project_dir.join(".claude/auto-approve-safe.toml")),
            dirs::home_dir().map(|p| p.join(".claude/auto-approve-safe/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config.with_project_dir(project_dir),
                    Err(e) => tracing::warn!("{e}"),
                }
            }
        }

        Config::default().with_project_dir(project_dir)
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.with_project_dir(Self::project_dir()))
    }

    /// Set the directory relative paths resolve against
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    /// `$CLAUDE_PROJECT_DIR`, else the current directory
    pub fn project_dir() -> PathBuf {
        std::env::var_os(PROJECT_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Expand ~ and anchor relative paths at the project directory
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let expanded = Self::expand_path(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.project_dir.join(expanded)
        }
    }

    /// Get the audit log path, if logging is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general
            .audit_path
            .as_ref()
            .map(|p| self.resolve_path(p))
    }

    /// Rule files in merge order
    pub fn rule_paths(&self) -> Vec<PathBuf> {
        self.rules
            .files
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }
}
