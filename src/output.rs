//! Verdicts and their hook output encoding
//!
//! The decision layer always produces one of three verdicts. Only at the
//! serialization boundary does `ask` turn into "write nothing", which the
//! host reads as "use your own permission prompt".

use serde::Serialize;

/// Decision result from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Run without asking
    Allow { reason: String },

    /// Block the operation
    Deny { reason: String },

    /// Defer to the host's normal permission system
    Ask { reason: String },
}

impl Verdict {
    /// Create an allow verdict
    pub fn allow(reason: impl Into<String>) -> Self {
        Verdict::Allow {
            reason: reason.into(),
        }
    }

    /// Create a deny verdict
    pub fn deny(reason: impl Into<String>) -> Self {
        Verdict::Deny {
            reason: reason.into(),
        }
    }

    /// Create an ask verdict
    pub fn ask(reason: impl Into<String>) -> Self {
        Verdict::Ask {
            reason: reason.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow { .. })
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Verdict::Deny { .. })
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Verdict::Ask { .. })
    }

    /// "allow", "deny" or "ask"
    pub fn decision(&self) -> &'static str {
        match self {
            Verdict::Allow { .. } => "allow",
            Verdict::Deny { .. } => "deny",
            Verdict::Ask { .. } => "ask",
        }
    }

    /// Get the reason
    pub fn reason(&self) -> &str {
        match self {
            Verdict::Allow { reason } | Verdict::Deny { reason } | Verdict::Ask { reason } => {
                reason
            }
        }
    }
}

/// Main output structure for the hook
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// Always "PreToolUse"
    #[serde(rename = "hookEventName")]
    pub hook_event_name: &'static str,

    /// "allow" or "deny"
    #[serde(rename = "permissionDecision")]
    pub permission_decision: &'static str,

    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Output for a verdict; `None` means stay silent (ask)
    pub fn from_verdict(verdict: &Verdict) -> Option<Self> {
        if verdict.is_ask() {
            return None;
        }
        Some(HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "PreToolUse",
                permission_decision: verdict.decision(),
                permission_decision_reason: verdict.reason().to_string(),
            },
        })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
