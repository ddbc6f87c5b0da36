//! Draw-time projection of cached spans onto screen columns

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::cache::LineCache;
use super::style::HighlightSpan;
use super::tokens::HighlightCategory;
use crate::error::{HighlightError, Result};
use crate::host::LineSource;

/// A category painted over a range of display columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedSpan {
    pub columns: Range<usize>,
    pub category: HighlightCategory,
}

/// Maps byte spans to display columns
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    tab_width: usize,
}

impl Default for Projector {
    fn default() -> Self {
        Self { tab_width: 8 }
    }
}

impl Projector {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Project the cached spans of `line` onto the visible `columns`.
    ///
    /// Never classifies: a line without cached spans projects to nothing.
    pub fn project<S: LineSource + ?Sized>(
        &self,
        cache: &LineCache,
        source: &S,
        line: usize,
        columns: Range<usize>,
    ) -> Result<Vec<ProjectedSpan>> {
        let line_count = source.line_count();
        if line >= line_count {
            return Err(HighlightError::OutOfRange { line, line_count });
        }
        match (source.line_text(line), cache.cached_spans(line)) {
            (Some(text), Some(spans)) => Ok(self.project_spans(text, spans, columns)),
            _ => Ok(Vec::new()),
        }
    }

    /// Project spans of `text` onto a column window
    pub fn project_spans(
        &self,
        text: &str,
        spans: &[HighlightSpan],
        window: Range<usize>,
    ) -> Vec<ProjectedSpan> {
        let mut projected = Vec::new();
        let mut byte = 0;
        let mut col = 0;

        for span in spans {
            let Some(start_col) = self.advance(text, &mut byte, &mut col, span.start) else {
                break;
            };
            if start_col >= window.end {
                break;
            }
            let Some(end_col) = self.advance(text, &mut byte, &mut col, span.end) else {
                break;
            };
            let lo = start_col.max(window.start);
            let hi = end_col.min(window.end);
            if lo < hi {
                projected.push(ProjectedSpan {
                    columns: lo..hi,
                    category: span.category,
                });
            }
        }

        projected
    }

    /// Display column of byte offset `target`, continuing from `byte`/`col`.
    ///
    /// None when the target is not a valid offset into `text` (stale spans).
    fn advance(&self, text: &str, byte: &mut usize, col: &mut usize, target: usize) -> Option<usize> {
        let piece = text.get(*byte..target)?;
        for ch in piece.chars() {
            *col += self.char_width(ch, *col);
        }
        *byte = target;
        Some(*col)
    }

    fn char_width(&self, ch: char, col: usize) -> usize {
        if ch == '\t' {
            self.tab_width - col % self.tab_width
        } else {
            UnicodeWidthChar::width(ch).unwrap_or(1)
        }
    }
}
