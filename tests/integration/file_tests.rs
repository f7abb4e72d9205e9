//! Integration tests for file tool decisions

use auto_approve_safe::{DecisionEngine, HookInput, RuleSet, Verdict};
use serde_json::json;

fn engine() -> DecisionEngine {
    DecisionEngine::new(&RuleSet {
        sensitive_paths: vec![
            r"\.env$".to_string(),
            r"\.ssh/".to_string(),
            r"\.pem$".to_string(),
            r"credentials".to_string(),
        ],
        ..Default::default()
    })
}

fn check(tool: &str, tool_input: serde_json::Value) -> Verdict {
    engine().decide(&HookInput::new(tool, tool_input))
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn test_plain_read_allowed() {
    assert_eq!(
        check("Read", json!({"file_path": "/repo/src/main.rs"})),
        Verdict::allow("Read operations are generally safe")
    );
}

#[test]
fn test_sensitive_read_asks() {
    for path in ["/repo/.env", "/home/u/.ssh/id_rsa", "certs/server.pem", "/repo/CREDENTIALS.json"] {
        assert_eq!(
            check("Read", json!({ "file_path": path })),
            Verdict::ask("File may contain sensitive data"),
            "{path}"
        );
    }
}

#[test]
fn test_read_without_path_allowed() {
    assert!(check("Read", json!({})).is_allow());
    assert!(check("Read", json!({"file_path": ""})).is_allow());
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn test_plain_write_allowed() {
    let engine = DecisionEngine::new(&RuleSet::empty());
    let input = HookInput::new("Write", json!({"file_path": "/repo/src/main.rs", "content": "fn main() {}"}));
    assert_eq!(
        engine.decide(&input),
        Verdict::allow("Write operations are generally safe")
    );
}

#[test]
fn test_sensitive_write_denied() {
    for tool in ["Write", "Edit", "MultiEdit"] {
        assert_eq!(
            check(tool, json!({"file_path": "/repo/.env"})),
            Verdict::deny("Cannot modify sensitive files"),
            "{tool}"
        );
    }
}

#[test]
fn test_non_string_path_asks() {
    for tool in ["Read", "Write", "Edit"] {
        assert_eq!(
            check(tool, json!({"file_path": [".env"]})),
            Verdict::ask("Invalid file_path"),
            "{tool}"
        );
    }
    assert!(check("Write", json!("/repo/.env")).is_ask());
}

#[test]
fn test_env_example_not_sensitive() {
    assert!(check("Edit", json!({"file_path": "/repo/.env.example"})).is_allow());
}

// ============================================================================
// Other tools
// ============================================================================

#[test]
fn test_search_allowed_even_on_sensitive_paths() {
    assert_eq!(
        check("Grep", json!({"pattern": "SECRET", "path": "/repo/.env"})),
        Verdict::allow("Search operations are read-only")
    );
    assert!(check("Glob", json!({"pattern": "**/*.pem"})).is_allow());
}

#[test]
fn test_unknown_tool_asks() {
    assert_eq!(
        check("WebFetch", json!({"url": "https://example.com"})),
        Verdict::ask("Unknown tool, deferring to permission system")
    );
}

#[test]
fn test_tool_names_are_case_sensitive() {
    assert!(check("read", json!({"file_path": "/repo/.env"})).is_ask());
    assert_eq!(
        check("read", json!({"file_path": "/repo/.env"})).reason(),
        "Unknown tool, deferring to permission system"
    );
}
