//! Content-shape predicates for single command segments

use once_cell::sync::Lazy;
use regex::Regex;

/// Shell viewers that print file contents
static FILE_READ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(cat|head|tail|less)\b").unwrap());

/// Deletion, move, or a leading overwrite redirection
static DESTRUCTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(rm|mv|>\s*)\b").unwrap());

/// True if the segment starts with a command that dumps file contents
/// (`cat .env`, `head ~/.ssh/id_rsa`, ...)
pub fn is_file_read_command(segment: &str) -> bool {
    FILE_READ.is_match(segment)
}

/// True if the segment deletes, moves, or truncates a file
pub fn is_destructive_command(segment: &str) -> bool {
    DESTRUCTIVE.is_match(segment)
}
