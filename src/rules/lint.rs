//! Static checks for rule files
//!
//! Catches the mistakes that silently weaken a rule set: patterns the
//! regex engine rejects (they match nothing), duplicates, allow patterns
//! that can never match because the segmenter strips the operators they
//! mention, broad patterns shadowing narrower ones for the same
//! command, and patterns listed as both allowed and denied.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use super::compiled::PatternSet;
use super::{RejectedPattern, RuleSet, Section};
use crate::error::RulesError;

/// Markers of a pattern that accepts arbitrary trailing arguments
const PERMISSIVE_MARKERS: &[&str] = &[".*", r"(\s+.*)?"];

/// Findings for one rule file
#[derive(Debug, Default)]
pub struct LintReport {
    pub path: PathBuf,
    /// The file is missing or could not be parsed
    pub load_error: Option<String>,
    pub invalid: Vec<RejectedPattern>,
    /// `(section, pattern, count)`
    pub duplicates: Vec<(Section, String, usize)>,
    pub dead_by_split: Vec<String>,
    /// `(command head, permissive patterns)`
    pub overlaps: Vec<(String, Vec<String>)>,
    /// Patterns in both `allow_patterns` and `deny_patterns`, sorted
    pub conflicts: Vec<String>,
}

impl LintReport {
    /// Missing files, unparsable files and invalid patterns fail the lint.
    /// Everything else is advisory.
    pub fn is_failure(&self) -> bool {
        self.load_error.is_some() || !self.invalid.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.is_failure()
            && self.duplicates.is_empty()
            && self.dead_by_split.is_empty()
            && self.overlaps.is_empty()
            && self.conflicts.is_empty()
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref err) = self.load_error {
            return writeln!(f, "[missing] {}: {}", self.path.display(), err);
        }

        writeln!(f, "== {} ==", self.path.display())?;

        for section in Section::ALL {
            let invalid: Vec<_> = self.invalid.iter().filter(|r| r.section == section).collect();
            if !invalid.is_empty() {
                writeln!(f, "[invalid regex] {section}")?;
                for reject in invalid {
                    writeln!(f, "  - {reject}")?;
                }
            }

            let dups: Vec<_> = self.duplicates.iter().filter(|d| d.0 == section).collect();
            if !dups.is_empty() {
                writeln!(f, "[duplicates] {section}")?;
                for (_, pattern, count) in dups {
                    writeln!(f, "  - {pattern} (x{count})")?;
                }
            }
        }

        if !self.dead_by_split.is_empty() {
            writeln!(f, "[dead by split] allow_patterns")?;
            for pattern in &self.dead_by_split {
                writeln!(f, "  - {pattern}")?;
            }
        }

        if !self.overlaps.is_empty() {
            writeln!(f, "[possible overlaps] allow_patterns")?;
            for (head, permissive) in &self.overlaps {
                writeln!(
                    f,
                    "  - {head}: permissive patterns may overlap others -> {}",
                    permissive.join(", ")
                )?;
            }
        }

        if !self.conflicts.is_empty() {
            writeln!(f, "[allow/deny conflict]")?;
            for pattern in &self.conflicts {
                writeln!(f, "  - {pattern}")?;
            }
        }

        if self.is_clean() {
            writeln!(f, "ok")?;
        }

        Ok(())
    }
}

/// Lint the rule file at `path`
pub fn lint_file(path: &Path) -> LintReport {
    if !path.exists() {
        return LintReport {
            path: path.to_path_buf(),
            load_error: Some("file not found".to_string()),
            ..Default::default()
        };
    }

    match RuleSet::from_file(path) {
        Ok(rules) => LintReport {
            path: path.to_path_buf(),
            ..lint_rules(&rules)
        },
        Err(e) => LintReport {
            path: path.to_path_buf(),
            load_error: Some(match e {
                RulesError::Read { source, .. } => source.to_string(),
                RulesError::Parse { source, .. } => source.to_string(),
            }),
            ..Default::default()
        },
    }
}

/// Lint an in-memory rule set
pub fn lint_rules(rules: &RuleSet) -> LintReport {
    let mut report = LintReport {
        invalid: rules.malformed.clone(),
        ..Default::default()
    };

    for section in Section::ALL {
        let patterns = rules.section(section);
        let (_, rejected) = PatternSet::compile(section, patterns);
        report.invalid.extend(rejected);
        report.duplicates.extend(
            find_duplicates(patterns)
                .into_iter()
                .map(|(pattern, count)| (section, pattern, count)),
        );
    }

    report.dead_by_split = find_dead_by_split(&rules.allow_patterns);
    report.overlaps = find_potential_overlaps(&rules.allow_patterns);
    report.conflicts = find_conflicts(&rules.allow_patterns, &rules.deny_patterns);
    report
}

/// Patterns present in both lists, sorted and deduplicated
pub fn find_conflicts(allow: &[String], deny: &[String]) -> Vec<String> {
    let allow: BTreeSet<&str> = allow.iter().map(String::as_str).collect();
    let deny: BTreeSet<&str> = deny.iter().map(String::as_str).collect();
    allow.intersection(&deny).map(|p| p.to_string()).collect()
}

/// Patterns appearing more than once, sorted, with their counts
pub fn find_duplicates(patterns: &[String]) -> Vec<(String, usize)> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for pattern in patterns {
        *seen.entry(pattern.as_str()).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(pattern, count)| (pattern.to_string(), count))
        .collect()
}

/// Allow patterns containing `&&` or an unescaped `;` outside character
/// classes. Segments never contain those operators, so such a pattern can
/// only match text that never reaches it.
pub fn find_dead_by_split(patterns: &[String]) -> Vec<String> {
    static CHAR_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

    patterns
        .iter()
        .filter(|pattern| {
            let stripped = CHAR_CLASS.replace_all(pattern, "");
            stripped.contains("&&") || has_unescaped_semicolon(&stripped)
        })
        .cloned()
        .collect()
}

fn has_unescaped_semicolon(pattern: &str) -> bool {
    let mut prev = None;
    for ch in pattern.chars() {
        if ch == ';' && prev != Some('\\') {
            return true;
        }
        prev = Some(ch);
    }
    false
}

/// Leading command names of an anchored pattern: `^cmd\b...` or
/// `^(a|b|c)\s+...`. Anything else yields no heads.
pub fn extract_command_heads(pattern: &str) -> BTreeSet<String> {
    static GROUP_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\^\(([^)]+)\)\\s+").unwrap());
    static WORD_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\^([A-Za-z0-9_-]+)\\b").unwrap());
    static PLAIN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

    if let Some(caps) = GROUP_HEAD.captures(pattern) {
        return caps[1]
            .split('|')
            .map(str::trim)
            .filter(|token| PLAIN_TOKEN.is_match(token))
            .map(String::from)
            .collect();
    }

    if let Some(caps) = WORD_HEAD.captures(pattern) {
        return BTreeSet::from([caps[1].to_string()]);
    }

    BTreeSet::new()
}

/// Heads with more than one pattern where at least one is permissive
pub fn find_potential_overlaps(patterns: &[String]) -> Vec<(String, Vec<String>)> {
    let mut by_head: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for pattern in patterns {
        for head in extract_command_heads(pattern) {
            by_head.entry(head).or_default().push(pattern);
        }
    }

    by_head
        .into_iter()
        .filter_map(|(head, group)| {
            let permissive: Vec<String> = group
                .iter()
                .filter(|p| PERMISSIVE_MARKERS.iter().any(|m| p.contains(m)))
                .map(|p| p.to_string())
                .collect();
            (!permissive.is_empty() && group.len() > 1).then_some((head, permissive))
        })
        .collect()
}
