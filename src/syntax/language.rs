//! Language definitions for syntax highlighting
//!
//! This module provides the LanguageDefinition struct that combines
//! a keyword set and lexical rules, and the line classifier built on it.

use super::keywords::KeywordSet;
use super::rules::{HighlightResult, LexRule, LineState, MultilineRule};
use super::style::{spans_well_formed, HighlightSpan};
use super::tokens::HighlightCategory;
use crate::error::{HighlightError, Result};

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Byte length of the run of identifier characters at `pos`
fn ident_run(text: &str, pos: usize) -> usize {
    text[pos..]
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(text.len() - pos)
}

/// Byte length of an identifier starting exactly at `pos`, 0 if none
fn ident_len(text: &str, pos: usize) -> usize {
    match text[pos..].chars().next() {
        Some(ch) if is_ident_start(ch) => ident_run(text, pos),
        _ => 0,
    }
}

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name, also the filetype tag (e.g., "Zig")
    pub name: String,
    /// File extensions (e.g., ["zig", "zon"])
    pub extensions: Vec<String>,
    /// Whole-word keyword lookup
    pub keywords: KeywordSet,
    /// Lexical rules, in registration order
    pub rules: Vec<LexRule>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            keywords: KeywordSet::new(),
            rules: Vec::new(),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add keywords under one category
    pub fn add_keywords(&mut self, words: &[&str], category: HighlightCategory) {
        self.keywords.add_all(words, category);
    }

    /// Add a lexical rule
    pub fn add_rule(&mut self, rule: LexRule) {
        self.rules.push(rule);
    }

    /// Get multiline rule by state ID
    pub fn multiline_rule(&self, state_id: u8) -> Option<&MultilineRule> {
        multiline_rule(&self.rules, state_id)
    }

    /// Highlight a single line of text
    ///
    /// Takes the line text and the state from the previous line.
    /// Returns spans and the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: LineState) -> Result<HighlightResult> {
        classify_line(text, &self.keywords, &self.rules, prev_state).map_err(|e| match e {
            HighlightError::InvalidInput(msg) => {
                HighlightError::InvalidInput(format!("{}: {}", self.name, msg))
            }
            other => other,
        })
    }
}

fn multiline_rule(rules: &[LexRule], state_id: u8) -> Option<&MultilineRule> {
    rules.iter().find_map(|rule| match rule {
        LexRule::Multiline(m) if m.state_id == state_id => Some(m),
        _ => None,
    })
}

/// Classify one line given the carry state entering it.
///
/// Spans come back sorted and non-overlapping, along with the carry
/// state leaving the line. With a normal carry-in the result depends
/// only on `text`, `keywords` and `rules`.
pub fn classify_line(
    text: &str,
    keywords: &KeywordSet,
    rules: &[LexRule],
    carry_in: LineState,
) -> Result<HighlightResult> {
    if text.contains('\n') {
        return Err(HighlightError::invalid("line text contains a line break"));
    }

    let mut spans = Vec::new();
    let mut pos = 0;

    if carry_in.is_inside_multiline() {
        let rule = multiline_rule(rules, carry_in.multiline_id).ok_or_else(|| {
            HighlightError::InvalidInput(format!(
                "no multiline rule with state {}",
                carry_in.multiline_id
            ))
        })?;
        match rule.find_end(text, 0) {
            Some(end) => {
                spans.push(HighlightSpan::new(0, end, rule.category));
                pos = end;
            }
            None => {
                if !text.is_empty() {
                    spans.push(HighlightSpan::new(0, text.len(), rule.category));
                }
                return Ok(finish(text, spans, carry_in));
            }
        }
    }

    let mut end_state = LineState::default();
    while pos < text.len() {
        match match_at(keywords, rules, text, pos) {
            Step::Span(end, category) => {
                spans.push(HighlightSpan::new(pos, end, category));
                pos = end;
            }
            Step::OpenMultiline(category, state_id) => {
                spans.push(HighlightSpan::new(pos, text.len(), category));
                end_state = LineState::inside(state_id);
                break;
            }
            Step::Skip(end) => pos = end,
        }
    }

    Ok(finish(text, spans, end_state))
}

/// Apply the rule precedence at one position
fn match_at(keywords: &KeywordSet, rules: &[LexRule], text: &str, pos: usize) -> Step {
    let rest = &text[pos..];

    for rule in rules {
        if let LexRule::ToEndOfLine { marker, category } = rule {
            if rest.starts_with(marker.as_str()) {
                return Step::Span(text.len(), *category);
            }
        }
    }

    for rule in rules {
        if let LexRule::Multiline(m) = rule {
            if rest.starts_with(m.open.as_str()) {
                return match m.find_end(text, pos + m.open.len()) {
                    Some(end) => Step::Span(end, m.category),
                    None => Step::OpenMultiline(m.category, m.state_id),
                };
            }
        }
    }

    for rule in rules {
        if let LexRule::Delimited(d) = rule {
            if rest.starts_with(d.open.as_str()) {
                match d.find_close(text, pos + d.open.len()) {
                    Some(end) => return Step::Span(end, d.category),
                    None if !d.is_bounded() => return Step::Span(text.len(), d.category),
                    None => {}
                }
            }
        }
    }

    let at_boundary = !text[..pos].chars().next_back().map_or(false, is_ident_char);
    let first = rest.chars().next().unwrap_or('\0');

    if at_boundary && first.is_ascii_digit() {
        for rule in rules {
            if let LexRule::Numbers(numbers) = rule {
                if let Some(len) = numbers.match_len(text, pos) {
                    let end = pos + len;
                    if text[end..].chars().next().map_or(false, is_ident_char) {
                        return Step::Skip(end + ident_run(text, end));
                    }
                    return Step::Span(end, HighlightCategory::Number);
                }
            }
        }
    }

    for rule in rules {
        if let LexRule::PrefixedWord { sigil, category } = rule {
            if first == *sigil {
                let word = ident_len(text, pos + sigil.len_utf8());
                if word > 0 {
                    return Step::Span(pos + sigil.len_utf8() + word, *category);
                }
            }
        }
    }

    if is_ident_start(first) {
        let end = pos + ident_run(text, pos);
        for rule in rules {
            if let LexRule::SuffixedWord { marker, category } = rule {
                if text[end..].starts_with(*marker) {
                    return Step::Span(end, *category);
                }
            }
        }
        return match keywords.get(&text[pos..end]) {
            Some(category) => Step::Span(end, category),
            None => Step::Skip(end),
        };
    }

    if first.is_ascii_digit() {
        return Step::Skip(pos + ident_run(text, pos));
    }

    Step::Skip(pos + first.len_utf8())
}

/// Check the span invariant before handing the line out
fn finish(text: &str, mut spans: Vec<HighlightSpan>, end_state: LineState) -> HighlightResult {
    if !spans_well_formed(text, &spans) {
        debug_assert!(false, "malformed spans for line {:?}: {:?}", text, spans);
        tracing::error!(line = text, "malformed spans, skipping highlight");
        spans.clear();
    }
    HighlightResult { spans, end_state }
}

/// Outcome of matching the rules at one position
enum Step {
    /// A span from the position to this end offset
    Span(usize, HighlightCategory),
    /// An unterminated multiline construct opens here
    OpenMultiline(HighlightCategory, u8),
    /// Plain text up to this offset
    Skip(usize),
}
