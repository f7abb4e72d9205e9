//! Shell command decisions
//!
//! The command is split into segments and each tier is checked against
//! every segment before the next tier runs, so a deny anywhere beats an
//! allowlist match anywhere else.

use crate::output::Verdict;
use crate::parser::classify::{is_destructive_command, is_file_read_command};
use crate::parser::segment::segment;
use crate::rules::glue::is_glue;
use crate::rules::CompiledRules;

/// Decide a shell command
pub fn check_command(command: &str, rules: &CompiledRules) -> Verdict {
    let command = command.trim();
    if command.is_empty() {
        return Verdict::ask("Empty command");
    }

    let segments = segment(command);
    if segments.is_empty() {
        return Verdict::ask("Empty command");
    }

    for seg in &segments {
        if let Some(pattern) = rules.deny.first_match(seg) {
            tracing::debug!(segment = %seg, pattern, "deny pattern matched");
            return Verdict::deny("Command matches dangerous pattern");
        }
    }

    // `cat .env`, `head ~/.ssh/id_rsa`, ...
    if segments
        .iter()
        .any(|seg| is_file_read_command(seg) && rules.sensitive.matches_any(seg))
    {
        return Verdict::ask("Bash command may read sensitive data");
    }

    // `rm .env`, `mv server.key backup`, ...
    if segments
        .iter()
        .any(|seg| is_destructive_command(seg) && rules.sensitive.matches_any(seg))
    {
        return Verdict::deny("Destructive command targets sensitive file");
    }

    if let Some(unmatched) = segments
        .iter()
        .find(|seg| !rules.allow.matches_any(seg) && !is_glue(seg))
    {
        return Verdict::ask(format!("Command not in allowlist: {unmatched}"));
    }

    Verdict::allow("Matches safe allowlist")
}
