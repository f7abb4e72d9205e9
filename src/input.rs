//! Input parsing for the PreToolUse hook JSON format
//!
//! The host writes one JSON object to stdin describing the tool it is
//! about to run. Only `tool_name` and a few keys of `tool_input` matter
//! to the decision; everything else is carried along untouched.

use serde::Deserialize;
use serde_json::{json, Value};

/// Shell-executing tool
pub const SHELL_TOOLS: &[&str] = &["Bash"];

/// Tools that expose file contents
pub const FILE_READ_TOOLS: &[&str] = &["Read"];

/// Tools that list or search without exposing or changing contents
pub const SEARCH_TOOLS: &[&str] = &["Grep", "Glob"];

/// Tools that create or modify files
pub const FILE_WRITE_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

/// Main input structure from the host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Edit")
    #[serde(default)]
    pub tool_name: String,

    /// Tool-specific parameters, kept as raw JSON
    #[serde(default)]
    pub tool_input: Value,
}

/// What a tool does, as far as the decision is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Shell,
    FileRead,
    Search,
    FileWrite,
    Unknown,
}

impl ToolKind {
    /// Classify a tool by name (exact, case-sensitive)
    pub fn from_name(name: &str) -> Self {
        if SHELL_TOOLS.contains(&name) {
            ToolKind::Shell
        } else if FILE_READ_TOOLS.contains(&name) {
            ToolKind::FileRead
        } else if SEARCH_TOOLS.contains(&name) {
            ToolKind::Search
        } else if FILE_WRITE_TOOLS.contains(&name) {
            ToolKind::FileWrite
        } else {
            ToolKind::Unknown
        }
    }
}

impl HookInput {
    /// Build an input directly (tests, benchmarks, embedding)
    pub fn new(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input,
        }
    }

    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn kind(&self) -> ToolKind {
        ToolKind::from_name(&self.tool_name)
    }

    /// A string field of `tool_input`; absent, null or non-string is `None`
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }

    /// The shell command, for shell tools
    pub fn command(&self) -> Option<&str> {
        self.str_field("command")
    }

    /// The target path, for file tools
    pub fn file_path(&self) -> Option<&str> {
        self.str_field("file_path")
    }

    /// True if `file_path` is present but not a string, or `tool_input`
    /// is not an object at all. Absent and null paths are fine.
    pub fn has_invalid_file_path(&self) -> bool {
        match self.tool_input {
            Value::Null => false,
            Value::Object(ref obj) => {
                matches!(obj.get("file_path"), Some(v) if !v.is_string() && !v.is_null())
            }
            _ => true,
        }
    }

    /// Small, reviewable summary of the input for the audit log.
    ///
    /// Shell tools record only the command and file tools only the path;
    /// anything else records just the names of its input keys.
    pub fn summary(&self) -> Value {
        match self.kind() {
            ToolKind::Shell => json!({ "command": self.command().unwrap_or_default() }),
            ToolKind::FileRead | ToolKind::FileWrite => {
                json!({ "file_path": self.file_path().unwrap_or_default() })
            }
            ToolKind::Search | ToolKind::Unknown => {
                let keys: Vec<&String> = self
                    .tool_input
                    .as_object()
                    .map(|obj| obj.keys().collect())
                    .unwrap_or_default();
                json!({ "tool_input_keys": keys })
            }
        }
    }
}
