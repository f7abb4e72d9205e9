//! Rule sets for auto-approve-safe
//!
//! A rule set is three lists of regex sources: commands to deny outright,
//! paths that hold secrets, and commands that are safe to run unattended.
//! Rule files are JSON and several of them merge by concatenation.

pub mod compiled;
pub mod glue;
pub mod lint;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::RulesError;

pub use compiled::{CompiledRules, PatternSet, RejectedPattern};

/// Which list of a rule set a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    AllowPatterns,
    DenyPatterns,
    SensitivePaths,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::AllowPatterns,
        Section::DenyPatterns,
        Section::SensitivePaths,
    ];

    /// Field name in the rule file
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::AllowPatterns => "allow_patterns",
            Section::DenyPatterns => "deny_patterns",
            Section::SensitivePaths => "sensitive_paths",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw pattern lists, in the on-disk JSON shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub allow_patterns: Vec<String>,
    pub deny_patterns: Vec<String>,
    pub sensitive_paths: Vec<String>,

    /// Entries that were not strings. They never match; every other
    /// entry of the same file still loads.
    #[serde(skip)]
    pub malformed: Vec<RejectedPattern>,
}

/// A rule file as written, before entries are checked one by one
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRuleSet {
    allow_patterns: Vec<Value>,
    deny_patterns: Vec<Value>,
    sensitive_paths: Vec<Value>,
}

impl RawRuleSet {
    fn into_rules(self) -> RuleSet {
        let mut malformed = Vec::new();
        let mut take = |section: Section, entries: Vec<Value>| -> Vec<String> {
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(pattern) => Some(pattern),
                    other => {
                        malformed.push(RejectedPattern {
                            section,
                            pattern: other.to_string(),
                            error: "pattern is not a string".to_string(),
                        });
                        None
                    }
                })
                .collect()
        };

        let allow_patterns = take(Section::AllowPatterns, self.allow_patterns);
        let deny_patterns = take(Section::DenyPatterns, self.deny_patterns);
        let sensitive_paths = take(Section::SensitivePaths, self.sensitive_paths);

        RuleSet {
            allow_patterns,
            deny_patterns,
            sensitive_paths,
            malformed,
        }
    }
}

impl RuleSet {
    /// An empty rule set: denies nothing, allows nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a rule set from JSON text.
    ///
    /// Only the document shape can fail: each section must be an array
    /// when present. Non-string entries land in [`RuleSet::malformed`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawRuleSet>(json).map(RawRuleSet::into_rules)
    }

    /// Load one rule file
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| RulesError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and merge rule files in order.
    ///
    /// A missing file contributes nothing. A file that cannot be read or
    /// parsed also contributes nothing, with a warning; the other sources
    /// still load.
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut rules = Self::empty();

        for path in paths {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "rule file not found, skipping");
                continue;
            }
            match Self::from_file(path) {
                Ok(source) => {
                    tracing::debug!(
                        path = %path.display(),
                        allow = source.allow_patterns.len(),
                        deny = source.deny_patterns.len(),
                        sensitive = source.sensitive_paths.len(),
                        malformed = source.malformed.len(),
                        "loaded rule file"
                    );
                    rules.extend(source);
                }
                Err(e) => tracing::warn!("{e}; using no rules from this source"),
            }
        }

        rules
    }

    /// Append another source's patterns after this one's
    pub fn extend(&mut self, other: RuleSet) {
        self.allow_patterns.extend(other.allow_patterns);
        self.deny_patterns.extend(other.deny_patterns);
        self.sensitive_paths.extend(other.sensitive_paths);
        self.malformed.extend(other.malformed);
    }

    /// Patterns in one section
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::AllowPatterns => &self.allow_patterns,
            Section::DenyPatterns => &self.deny_patterns,
            Section::SensitivePaths => &self.sensitive_paths,
        }
    }

    /// Total number of patterns across all sections
    pub fn len(&self) -> usize {
        self.allow_patterns.len() + self.deny_patterns.len() + self.sensitive_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
