//! Lexical rules for syntax highlighting
//!
//! This module defines the rule types a language is built from and
//! the per-line carry state used for multi-line constructs.

use regex::Regex;

use super::style::HighlightSpan;
use super::tokens::HighlightCategory;

/// Scan forward from `from` for `close`, skipping escaped characters.
///
/// Returns the byte offset just past the close marker. With a `max_len`,
/// gives up once that many characters have been consumed; an escape
/// sequence counts as one character.
fn scan_to_close(
    text: &str,
    from: usize,
    close: &str,
    escape: Option<char>,
    max_len: Option<usize>,
) -> Option<usize> {
    let mut pos = from;
    let mut consumed = 0;
    while pos < text.len() {
        if text[pos..].starts_with(close) {
            return Some(pos + close.len());
        }
        if max_len.map_or(false, |max| consumed >= max) {
            return None;
        }
        let mut chars = text[pos..].chars();
        let ch = chars.next()?;
        pos += ch.len_utf8();
        if Some(ch) == escape {
            if let Some(escaped) = chars.next() {
                pos += escaped.len_utf8();
            }
        }
        consumed += 1;
    }
    None
}

/// A region between two markers on a single line ("..." or '...')
#[derive(Debug, Clone)]
pub struct DelimitedRule {
    /// Marker that opens the region
    pub open: String,
    /// Marker that closes the region
    pub close: String,
    /// Character that escapes the next one
    pub escape: Option<char>,
    /// Maximum characters between the markers (None = unbounded)
    pub max_len: Option<usize>,
    /// Category for the whole region, markers included
    pub category: HighlightCategory,
}

impl DelimitedRule {
    pub fn new(
        open: &str,
        close: &str,
        escape: Option<char>,
        max_len: Option<usize>,
        category: HighlightCategory,
    ) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            escape,
            max_len,
            category,
        }
    }

    /// Find the end of a region whose open marker ends at `from`
    pub fn find_close(&self, text: &str, from: usize) -> Option<usize> {
        scan_to_close(text, from, &self.close, self.escape, self.max_len)
    }

    pub fn is_bounded(&self) -> bool {
        self.max_len.is_some()
    }
}

/// A multi-line construct rule (block comments)
///
/// These rules track state across lines through their `state_id`.
#[derive(Debug, Clone)]
pub struct MultilineRule {
    /// Name for debugging
    pub name: String,
    /// Marker that starts the construct
    pub open: String,
    /// Marker that ends the construct
    pub close: String,
    /// Escape character, if the close marker can be escaped
    pub escape: Option<char>,
    /// Category for this construct
    pub category: HighlightCategory,
    /// Unique ID for this multiline state (1-255, 0 = normal)
    pub state_id: u8,
}

impl MultilineRule {
    /// Create a new multiline rule; `state_id` 0 is reserved for normal
    pub fn new(
        name: &str,
        open: &str,
        close: &str,
        category: HighlightCategory,
        state_id: u8,
    ) -> Option<Self> {
        if state_id == 0 || open.is_empty() || close.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            open: open.to_string(),
            close: close.to_string(),
            escape: None,
            category,
            state_id,
        })
    }

    /// Builder: allow the close marker to be escaped
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Find end of this construct in text, respecting escapes
    pub fn find_end(&self, text: &str, from: usize) -> Option<usize> {
        scan_to_close(text, from, &self.close, self.escape, None)
    }
}

/// Numeric literal grammar
#[derive(Debug, Clone)]
pub struct NumberRule {
    /// Anchored pattern matched at the scan position
    pub pattern: Regex,
}

/// Zig-style integers and floats with `_` separators
pub const STANDARD_NUMBER_PATTERN: &str = concat!(
    r"^(?:0x[0-9a-fA-F_]+(?:\.[0-9a-fA-F_]+)?(?:[pP][+-]?[0-9_]+)?",
    r"|0o[0-7_]+",
    r"|0b[01_]+",
    r"|[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9_]+)?)",
);

impl NumberRule {
    /// Create a number rule; the pattern is anchored at the scan position
    pub fn new(pattern: &str) -> Option<Self> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^(?:{})", pattern)
        };
        Regex::new(&anchored).ok().map(|pattern| Self { pattern })
    }

    pub fn standard() -> Option<Self> {
        Self::new(STANDARD_NUMBER_PATTERN)
    }

    /// Length in bytes of the literal starting at `pos`, if any
    pub fn match_len(&self, text: &str, pos: usize) -> Option<usize> {
        let m = self.pattern.find(text.get(pos..)?)?;
        (m.end() > 0).then_some(m.end())
    }
}

/// One lexical rule of a language
#[derive(Debug, Clone)]
pub enum LexRule {
    /// Single-line region between markers
    Delimited(DelimitedRule),
    /// Region that may span lines
    Multiline(MultilineRule),
    /// Everything from the marker to end of line
    ToEndOfLine {
        marker: String,
        category: HighlightCategory,
    },
    /// Sigil followed by an identifier (@import)
    PrefixedWord {
        sigil: char,
        category: HighlightCategory,
    },
    /// Identifier directly followed by a marker (call sites before `(`)
    SuffixedWord {
        marker: char,
        category: HighlightCategory,
    },
    /// Numeric literals
    Numbers(NumberRule),
}

/// Line state for tracking multi-line constructs
///
/// This is stored per-line to track whether we're inside a
/// multi-line comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineState {
    /// 0 = normal, non-zero = inside multiline rule with this ID
    pub multiline_id: u8,
}

impl LineState {
    /// Create state for being inside a multiline construct
    pub fn inside(state_id: u8) -> Self {
        Self { multiline_id: state_id }
    }

    /// Check if we're inside a multiline construct
    pub fn is_inside_multiline(&self) -> bool {
        self.multiline_id != 0
    }

    /// Check if we're in normal (no multiline) state
    pub fn is_normal(&self) -> bool {
        self.multiline_id == 0
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Classified spans in this line
    pub spans: Vec<HighlightSpan>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_close_with_escape() {
        let rule = DelimitedRule::new("\"", "\"", Some('\\'), None, HighlightCategory::String);
        // text after the opening quote
        assert_eq!(rule.find_close(r#""hello""#, 1), Some(7));
        assert_eq!(rule.find_close(r#""a\"b""#, 1), Some(6));
        assert_eq!(rule.find_close(r#""a\\"b"#, 1), Some(5));
        assert_eq!(rule.find_close(r#""open"#, 1), None);
    }

    #[test]
    fn test_bounded_char_literal() {
        let rule = DelimitedRule::new("'", "'", Some('\\'), Some(1), HighlightCategory::Char);
        assert_eq!(rule.find_close("'a'", 1), Some(3));
        assert_eq!(rule.find_close(r"'\n'", 1), Some(4));
        assert_eq!(rule.find_close("'ab'", 1), None);
        assert_eq!(rule.find_close("'é'", 1), Some(4));
        assert!(rule.is_bounded());
    }

    #[test]
    fn test_multiline_rule() {
        let rule = MultilineRule::new("block_comment", "/*", "*/", HighlightCategory::Comment, 1)
            .unwrap();
        assert_eq!(rule.find_end("/* comment */", 2), Some(13));
        assert_eq!(rule.find_end("/* comment", 2), None);
        assert!(MultilineRule::new("bad", "/*", "*/", HighlightCategory::Comment, 0).is_none());
    }

    #[test]
    fn test_multiline_with_escape() {
        let rule = MultilineRule::new("block", "<<", ">>", HighlightCategory::String, 2)
            .unwrap()
            .with_escape('\\');
        assert_eq!(rule.find_end(r"a\>>b>>", 0), Some(7));
    }

    #[test]
    fn test_number_rule() {
        let rule = NumberRule::standard().unwrap();
        assert_eq!(rule.match_len("42;", 0), Some(2));
        assert_eq!(rule.match_len("x = 1_000_000", 4), Some(9));
        assert_eq!(rule.match_len("0xFF_ff)", 0), Some(7));
        assert_eq!(rule.match_len("0b1010", 0), Some(6));
        assert_eq!(rule.match_len("0o755", 0), Some(5));
        assert_eq!(rule.match_len("3.14e-2", 0), Some(7));
        assert_eq!(rule.match_len("0x1.8p3", 0), Some(7));
        assert_eq!(rule.match_len("1..5", 0), Some(1));
        assert_eq!(rule.match_len("abc", 0), None);
    }

    #[test]
    fn test_line_state() {
        let normal = LineState::default();
        assert!(normal.is_normal());
        assert!(!normal.is_inside_multiline());

        let inside = LineState::inside(1);
        assert!(!inside.is_normal());
        assert!(inside.is_inside_multiline());
    }
}
