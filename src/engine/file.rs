//! File operation decisions
//!
//! Reads and writes are allowed by default. Paths matching a
//! sensitive-path pattern make reads ask and writes fail.

use crate::output::Verdict;
use crate::rules::PatternSet;

/// True if `file_path` matches a sensitive-path pattern. A missing or
/// empty path never does.
pub fn is_sensitive_path(file_path: Option<&str>, sensitive: &PatternSet) -> bool {
    match file_path {
        Some(path) if !path.is_empty() => sensitive.matches_any(path),
        _ => false,
    }
}

/// Decide a file read
pub fn check_read(file_path: Option<&str>, sensitive: &PatternSet) -> Verdict {
    if is_sensitive_path(file_path, sensitive) {
        return Verdict::ask("File may contain sensitive data");
    }
    Verdict::allow("Read operations are generally safe")
}

/// Decide a file write or edit
pub fn check_write(file_path: Option<&str>, sensitive: &PatternSet) -> Verdict {
    if is_sensitive_path(file_path, sensitive) {
        return Verdict::deny("Cannot modify sensitive files");
    }
    Verdict::allow("Write operations are generally safe")
}
