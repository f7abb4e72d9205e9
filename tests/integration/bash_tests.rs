//! Integration tests for shell command decisions

use auto_approve_safe::{DecisionEngine, HookInput, RuleSet, Verdict};
use proptest::prelude::*;
use serde_json::json;

fn rules() -> RuleSet {
    RuleSet::from_json(
        r#"{
            "allow_patterns": [
                "^ls\\b.*$",
                "^pwd$",
                "^cat\\b.*$",
                "^rm\\b.*$",
                "^echo\\b.*$",
                "^git (status|diff|log)\\b.*$",
                "^grep\\b.*$",
                "^tail\\b.*$",
                "^(npm|pnpm) (install|test|run build)(\\s+.*)?$"
            ],
            "deny_patterns": [
                "\\brm\\s+-rf\\s+/",
                "\\|\\s*(ba)?sh\\b",
                "\\bsudo\\b"
            ],
            "sensitive_paths": [
                "\\.env$",
                "\\.env\\b",
                "\\.ssh/",
                "\\.pem$"
            ]
        }"#,
    )
    .unwrap()
}

fn engine() -> DecisionEngine {
    DecisionEngine::new(&rules())
}

fn check_bash(command: &str) -> Verdict {
    engine().decide(&HookInput::new("Bash", json!({ "command": command })))
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_allowlisted_compound_allowed() {
    let rules = RuleSet::from_json(r#"{"allow_patterns": ["^ls\\b.*$", "^pwd$"]}"#).unwrap();
    let input = HookInput::new("Bash", json!({"command": "ls -la && pwd"}));
    assert_eq!(
        DecisionEngine::new(&rules).decide(&input),
        Verdict::allow("Matches safe allowlist")
    );
}

#[test]
fn test_sensitive_read_asks_without_allowlist() {
    let rules = RuleSet::from_json(r#"{"sensitive_paths": ["\\.env$"]}"#).unwrap();
    let input = HookInput::new("Bash", json!({"command": "cat .env"}));
    assert_eq!(
        DecisionEngine::new(&rules).decide(&input),
        Verdict::ask("Bash command may read sensitive data")
    );
}

#[test]
fn test_destructive_sensitive_denied() {
    let rules = RuleSet::from_json(r#"{"sensitive_paths": ["\\.env$"]}"#).unwrap();
    let input = HookInput::new("Bash", json!({"command": "rm .env"}));
    assert_eq!(
        DecisionEngine::new(&rules).decide(&input),
        Verdict::deny("Destructive command targets sensitive file")
    );

    // allowlisting rm does not change it
    assert_eq!(
        check_bash("rm .env"),
        Verdict::deny("Destructive command targets sensitive file")
    );
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_deny_anywhere_denies_whole_command() {
    assert!(check_bash("ls && rm -rf /").is_deny());
    assert!(check_bash("rm -rf / ; ls").is_deny());
    assert!(check_bash("echo hi | sudo tee /etc/hosts").is_deny());
}

#[test]
fn test_deny_beats_sensitive_read() {
    assert_eq!(
        check_bash("cat .env; rm -rf /"),
        Verdict::deny("Command matches dangerous pattern")
    );
}

#[test]
fn test_sensitive_read_beats_destructive() {
    assert_eq!(
        check_bash("cat .env && rm server.pem"),
        Verdict::ask("Bash command may read sensitive data")
    );
}

#[test]
fn test_one_unknown_segment_asks() {
    assert_eq!(
        check_bash("ls && make install"),
        Verdict::ask("Command not in allowlist: make install")
    );
}

#[test]
fn test_first_unknown_segment_named() {
    assert_eq!(
        check_bash("make && cmake . && ls"),
        Verdict::ask("Command not in allowlist: make")
    );
}

#[test]
fn test_empty_command_asks() {
    assert_eq!(check_bash(""), Verdict::ask("Empty command"));
    assert_eq!(check_bash("  \t "), Verdict::ask("Empty command"));
}

// ============================================================================
// Segmentation seen through decisions
// ============================================================================

#[test]
fn test_operators_in_quotes_do_not_split() {
    // one echo segment, so the allowlisted echo covers it all
    assert!(check_bash(r#"echo "a && make install""#).is_allow());
    assert!(check_bash("echo 'x; make; y'").is_allow());
}

#[test]
fn test_substitution_is_one_segment() {
    assert!(check_bash("echo $(make; cmake)").is_allow());
    assert!(check_bash("echo `make || cmake`").is_allow());
}

#[test]
fn test_escaped_operator_does_not_split() {
    assert!(check_bash(r"echo a \; make").is_allow());
}

#[test]
fn test_redirections_stay_in_segment() {
    assert!(check_bash("ls > out.txt 2>&1").is_allow());
    assert!(check_bash("npm test 2>&1 | tail -5").is_allow());
}

#[test]
fn test_glue_segments_need_no_allowlist() {
    assert!(check_bash("cd /repo && git status").is_allow());
    assert!(check_bash("export FOO=bar && ls").is_allow());
    assert!(check_bash("pushd src && ls && popd").is_allow());
    assert!(check_bash("FOO=1; true").is_allow());
}

#[test]
fn test_glue_does_not_launder_deny() {
    assert!(check_bash("cd / && sudo ls").is_deny());
}

// ============================================================================
// Rule set robustness
// ============================================================================

#[test]
fn test_invalid_pattern_isolated() {
    let rules = RuleSet::from_json(
        r#"{
            "allow_patterns": ["^ls(?!x)", "^ls\\b.*$"],
            "deny_patterns": ["([unclosed", "\\bsudo\\b"]
        }"#,
    )
    .unwrap();
    let engine = DecisionEngine::new(&rules);
    assert_eq!(engine.rules().rejected().len(), 2);

    let ls = HookInput::new("Bash", json!({"command": "ls -la"}));
    assert!(engine.decide(&ls).is_allow());

    let sudo = HookInput::new("Bash", json!({"command": "sudo ls"}));
    assert!(engine.decide(&sudo).is_deny());
}

#[test]
fn test_non_string_entry_keeps_rest_of_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let global = dir.path().join("global.json");
    let project = dir.path().join("project.json");
    std::fs::write(&global, r#"{"allow_patterns": ["^git\\b.*$"]}"#).unwrap();
    std::fs::write(&project, r#"{"deny_patterns": ["git push --force", null]}"#).unwrap();

    let engine = DecisionEngine::new(&RuleSet::load(&[global, project]));
    assert_eq!(engine.rules().rejected().len(), 1);

    let push = HookInput::new("Bash", json!({"command": "git push --force"}));
    assert_eq!(
        engine.decide(&push),
        Verdict::deny("Command matches dangerous pattern")
    );

    let status = HookInput::new("Bash", json!({"command": "git status"}));
    assert!(engine.decide(&status).is_allow());
}

#[test]
fn test_patterns_case_insensitive() {
    assert!(check_bash("LS -LA").is_allow());
    assert!(check_bash("ls; SUDO reboot").is_deny());
}

#[test]
fn test_empty_rule_set_asks() {
    let engine = DecisionEngine::new(&RuleSet::empty());
    let input = HookInput::new("Bash", json!({"command": "ls"}));
    assert_eq!(engine.decide(&input), Verdict::ask("Command not in allowlist: ls"));
}

proptest! {
    #[test]
    fn prop_decide_is_idempotent(command in "[a-z &|;'\"$()`.]{0,40}") {
        let engine = engine();
        let input = HookInput::new("Bash", json!({ "command": command }));
        prop_assert_eq!(engine.decide(&input), engine.decide(&input));
    }

    #[test]
    fn prop_appending_denied_segment_denies(command in "[a-z ]{1,20}") {
        let full = format!("{command} && sudo reboot");
        prop_assert!(check_bash(&full).is_deny());
    }
}
