//! Pattern compilation and matching
//!
//! Every pattern is compiled exactly once, case-insensitively. A pattern
//! the regex engine rejects becomes a [`RejectedPattern`] instead of an
//! error: it matches nothing, and the rest of its section keeps working.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use super::{RuleSet, Section};

/// A pattern that failed to compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedPattern {
    pub section: Section,
    pub pattern: String,
    pub error: String,
}

impl std::fmt::Display for RejectedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.section, self.pattern, self.error)
    }
}

/// Compile one pattern with the matcher's flags
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// The validated matchers of one section
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    matchers: Vec<Regex>,
}

impl PatternSet {
    /// Compile `patterns`, returning the valid matchers and the rejects
    pub fn compile(section: Section, patterns: &[String]) -> (Self, Vec<RejectedPattern>) {
        let mut matchers = Vec::with_capacity(patterns.len());
        let mut rejected = Vec::new();

        for pattern in patterns {
            match compile_pattern(pattern) {
                Ok(re) => matchers.push(re),
                Err(e) => rejected.push(RejectedPattern {
                    section,
                    pattern: pattern.clone(),
                    error: e.to_string(),
                }),
            }
        }

        (Self { matchers }, rejected)
    }

    /// Build from patterns known to be valid (built-in tables)
    pub fn from_static(patterns: &[&str]) -> Self {
        let matchers = patterns
            .iter()
            .filter_map(|p| compile_pattern(p).ok())
            .collect();
        Self { matchers }
    }

    /// True if any pattern matches anywhere in `text`
    pub fn matches_any(&self, text: &str) -> bool {
        self.matchers.iter().any(|re| re.is_match(text))
    }

    /// Source of the first matching pattern, for diagnostics
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.matchers
            .iter()
            .find(|re| re.is_match(text))
            .map(|re| re.as_str())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// A rule set after compilation
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub deny: PatternSet,
    pub sensitive: PatternSet,
    pub allow: PatternSet,
    rejected: Vec<RejectedPattern>,
}

impl CompiledRules {
    /// Compile every section of `rules`
    pub fn compile(rules: &RuleSet) -> Self {
        let mut rejected = rules.malformed.clone();
        let (deny, r) = PatternSet::compile(Section::DenyPatterns, &rules.deny_patterns);
        rejected.extend(r);
        let (sensitive, r) = PatternSet::compile(Section::SensitivePaths, &rules.sensitive_paths);
        rejected.extend(r);
        let (allow, r) = PatternSet::compile(Section::AllowPatterns, &rules.allow_patterns);
        rejected.extend(r);

        for reject in &rejected {
            tracing::warn!(
                section = %reject.section,
                pattern = %reject.pattern,
                "invalid pattern will never match: {}",
                reject.error
            );
        }

        Self {
            deny,
            sensitive,
            allow,
            rejected,
        }
    }

    /// Non-string entries first, then patterns that failed to compile in
    /// section order deny, sensitive, allow
    pub fn rejected(&self) -> &[RejectedPattern] {
        &self.rejected
    }
}
