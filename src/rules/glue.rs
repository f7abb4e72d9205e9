//! Built-in allowlist for shell scaffolding
//!
//! Agents routinely chain `cd dir && ...` or `FOO=1; ...` around the real
//! work. These segments are harmless on their own, so they pass the
//! allowlist tier without any user configuration.

use once_cell::sync::Lazy;

use super::PatternSet;

/// Directory navigation, variable assignment, `true`/`false`
pub const GLUE_PATTERNS: &[&str] = &[
    r"^cd\s+\S+(\s+.*)?$",
    r"^pushd\s+\S+(\s+.*)?$",
    r"^popd$",
    r"^export\s+[A-Za-z_][A-Za-z0-9_]*=.*$",
    r"^[A-Za-z_][A-Za-z0-9_]*=.*$",
    r"^(true|false)$",
];

static GLUE: Lazy<PatternSet> = Lazy::new(|| PatternSet::from_static(GLUE_PATTERNS));

/// True if `segment` is benign scaffolding
pub fn is_glue(segment: &str) -> bool {
    GLUE.matches_any(segment)
}
