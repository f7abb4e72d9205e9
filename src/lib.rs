//! auto-approve-safe - PreToolUse hook for maximum-autonomy solo workflows
//!
//! Decides whether an agent's tool call can run without a human prompt.
//! Shell commands are split into the sub-commands they will actually run
//! and each one is checked against deny, sensitive-path and allow
//! patterns; file reads and writes are checked against sensitive paths.
//!
//! # Features
//!
//! - **Quote-aware segmentation**: `&&`, `||`, `;` and `|` split only at
//!   the top level, never inside quotes, `$(...)`, backticks or braces
//! - **Deny first**: a dangerous segment anywhere denies the whole call
//! - **Secret protection**: reads of sensitive paths ask, writes and
//!   deletes of them are denied
//! - **Fail-safe patterns**: an invalid regex matches nothing instead of
//!   breaking the rule set
//! - **Audit logging**: optional JSONL log of every decision
//!
//! # Example
//!
//! ```
//! use auto_approve_safe::{DecisionEngine, HookInput, RuleSet};
//!
//! let rules = RuleSet::from_json(
//!     r#"{"allow_patterns": ["^ls\\b.*$", "^pwd$"], "deny_patterns": ["rm\\s+-rf"]}"#,
//! )
//! .unwrap();
//! let engine = DecisionEngine::new(&rules);
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"ls -la && pwd"}}"#;
//! let verdict = engine.decide(&HookInput::from_json(input).unwrap());
//! assert!(verdict.is_allow());
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"ls; rm -rf /"}}"#;
//! let verdict = engine.decide(&HookInput::from_json(input).unwrap());
//! assert!(verdict.is_deny());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod rules;
pub mod tracing_init;

// Re-exports for convenience
pub use config::Config;
pub use engine::{decide, DecisionEngine};
pub use input::{HookInput, ToolKind};
pub use output::{HookOutput, Verdict};
pub use parser::segment::segment;
pub use rules::{CompiledRules, RuleSet};
