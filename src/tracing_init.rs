//! Diagnostic output
//!
//! Stdout carries the decision and nothing else, so every diagnostic goes
//! to stderr through `tracing`.

use tracing::level_filters::LevelFilter;

/// Environment variable selecting the diagnostic level
pub const LOG_ENV: &str = "AUTO_APPROVE_SAFE_LOG";

/// Parse a level name; unknown names fall back to `warn`
pub fn level_from_str(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::WARN,
    }
}

pub fn init_tracing() {
    let level = std::env::var(LOG_ENV)
        .map(|v| level_from_str(&v))
        .unwrap_or(LevelFilter::WARN);

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}
