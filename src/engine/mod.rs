//! Decision engine for auto-approve-safe
//!
//! Routes a tool call to the shell or file checker and returns one
//! verdict for the whole call. Deciding is a pure function of the call
//! and the compiled rules.

pub mod bash;
pub mod file;

use crate::input::{HookInput, ToolKind};
use crate::output::Verdict;
use crate::rules::{CompiledRules, RuleSet};

/// The main decision engine
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    rules: CompiledRules,
}

impl DecisionEngine {
    /// Compile `rules` and build an engine around them
    pub fn new(rules: &RuleSet) -> Self {
        Self::with_compiled(CompiledRules::compile(rules))
    }

    pub fn with_compiled(rules: CompiledRules) -> Self {
        Self { rules }
    }

    /// Main entry point: decide a tool call
    pub fn decide(&self, input: &HookInput) -> Verdict {
        decide(input, &self.rules)
    }

    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }
}

/// Decide a tool call against compiled rules
pub fn decide(input: &HookInput, rules: &CompiledRules) -> Verdict {
    match input.kind() {
        ToolKind::Shell => bash::check_command(input.command().unwrap_or_default(), rules),
        ToolKind::FileRead | ToolKind::FileWrite if input.has_invalid_file_path() => {
            Verdict::ask("Invalid file_path")
        }
        ToolKind::FileRead => file::check_read(input.file_path(), &rules.sensitive),
        ToolKind::Search => Verdict::allow("Search operations are read-only"),
        ToolKind::FileWrite => file::check_write(input.file_path(), &rules.sensitive),
        ToolKind::Unknown => Verdict::ask("Unknown tool, deferring to permission system"),
    }
}
