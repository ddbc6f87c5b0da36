//! Style and span types
//!
//! Spans carry a semantic category; the style is resolved from the
//! category only when a line is rendered.

use super::tokens::HighlightCategory;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A classified span of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category assigned to the text
    pub category: HighlightCategory,
}

impl HighlightSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, category: HighlightCategory) -> Self {
        Self { start, end, category }
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The text this span covers
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.start..self.end).unwrap_or("")
    }
}

/// Check the span invariant for one line: non-empty, sorted,
/// non-overlapping, and on char boundaries inside `text`.
pub fn spans_well_formed(text: &str, spans: &[HighlightSpan]) -> bool {
    let mut prev_end = 0;
    for span in spans {
        if span.is_empty()
            || span.start < prev_end
            || span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            return false;
        }
        prev_end = span.end;
    }
    true
}

/// Split a line into consecutive pieces covering it exactly.
///
/// Gaps between spans come back with no category.
pub fn segments<'a>(
    text: &'a str,
    spans: &[HighlightSpan],
) -> Vec<(&'a str, Option<HighlightCategory>)> {
    let mut pieces = Vec::with_capacity(spans.len() * 2 + 1);
    let mut pos = 0;
    for span in spans {
        if span.start > pos {
            pieces.push((&text[pos..span.start], None));
        }
        pieces.push((&text[span.start..span.end], Some(span.category)));
        pos = span.end;
    }
    if pos < text.len() {
        pieces.push((&text[pos..], None));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_italic();
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Default);
        assert!(style.bold);
        assert!(style.italic);
        assert!(!style.underline);
    }

    #[test]
    fn test_span_len() {
        let span = HighlightSpan::new(5, 10, HighlightCategory::Number);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(HighlightSpan::new(5, 5, HighlightCategory::Number).is_empty());
    }

    #[test]
    fn test_well_formed_rejects_overlap() {
        let text = "abcdefgh";
        let ok = [
            HighlightSpan::new(0, 2, HighlightCategory::Keyword),
            HighlightSpan::new(2, 4, HighlightCategory::Type),
        ];
        assert!(spans_well_formed(text, &ok));

        let overlap = [
            HighlightSpan::new(0, 3, HighlightCategory::Keyword),
            HighlightSpan::new(2, 4, HighlightCategory::Type),
        ];
        assert!(!spans_well_formed(text, &overlap));

        let past_end = [HighlightSpan::new(6, 9, HighlightCategory::Keyword)];
        assert!(!spans_well_formed(text, &past_end));
    }

    #[test]
    fn test_segments_fill_gaps() {
        let text = "a bc d";
        let spans = [HighlightSpan::new(2, 4, HighlightCategory::Keyword)];
        let pieces = segments(text, &spans);
        assert_eq!(
            pieces,
            vec![
                ("a ", None),
                ("bc", Some(HighlightCategory::Keyword)),
                (" d", None),
            ]
        );
    }
}
