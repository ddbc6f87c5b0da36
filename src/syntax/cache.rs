//! Incremental per-buffer highlight cache
//!
//! The cache holds a contiguous prefix of a buffer's lines: spans plus
//! the carry state entering and leaving each line. Reads extend the
//! prefix lazily; edits splice it and recompute forward only until the
//! carry state reaches a fixed point.

use std::sync::Arc;

use super::language::LanguageDefinition;
use super::rules::LineState;
use super::style::HighlightSpan;
use crate::error::{HighlightError, Result};
use crate::host::{EditKind, EditRange, LineSource};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedLine {
    spans: Vec<HighlightSpan>,
    start_state: LineState,
    end_state: LineState,
}

/// Snapshot taken before an edit is applied
#[derive(Debug, Clone, Copy)]
struct PendingEdit {
    edit: EditRange,
    line_count: usize,
    touches_multiline: bool,
}

/// Per-buffer highlighting cache
#[derive(Debug)]
pub struct LineCache {
    language: Arc<LanguageDefinition>,
    lines: Vec<CachedLine>,
    pending: Option<PendingEdit>,
}

impl LineCache {
    /// Create an empty cache classifying with `language`
    pub fn new(language: Arc<LanguageDefinition>) -> Self {
        Self {
            language,
            lines: Vec::new(),
            pending: None,
        }
    }

    pub fn language(&self) -> &Arc<LanguageDefinition> {
        &self.language
    }

    /// Number of lines (from the top) with cached spans
    pub fn cached_lines(&self) -> usize {
        self.lines.len()
    }

    /// Carry state at the end of a cached line
    pub fn line_state(&self, line: usize) -> Option<LineState> {
        self.lines.get(line).map(|l| l.end_state)
    }

    /// Cached spans of a line, without computing anything
    pub fn cached_spans(&self, line: usize) -> Option<&[HighlightSpan]> {
        self.lines.get(line).map(|l| l.spans.as_slice())
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        self.lines.truncate(line);
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.lines.clear();
        self.pending = None;
    }

    /// Get the spans of a line, classifying lines up to it if needed
    pub fn get_spans<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
        line: usize,
    ) -> Result<&[HighlightSpan]> {
        let line_count = source.line_count();
        if line >= line_count {
            return Err(HighlightError::OutOfRange { line, line_count });
        }
        if self.lines.len() > line_count {
            self.lines.truncate(line_count);
        }
        if self.lines.len() <= line {
            tracing::trace!(from = self.lines.len(), to = line, "extending highlight cache");
        }
        while self.lines.len() <= line {
            let idx = self.lines.len();
            let computed = self.compute_line(source, idx, self.carry_into(idx))?;
            self.lines.push(computed);
        }
        Ok(&self.lines[line].spans)
    }

    /// Record an edit that is about to be applied.
    ///
    /// Returns whether the edited lines touch a multi-line construct.
    /// That flag is diagnostic only: the post-modify pass always walks
    /// forward until the carry state settles.
    pub fn on_pre_modify<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
        edit: EditRange,
    ) -> Result<bool> {
        let line_count = source.line_count();
        if edit.start + edit.removed > line_count {
            return Err(HighlightError::InvalidInput(format!(
                "edit of lines {:?} outside buffer of {} lines",
                edit.old_lines(),
                line_count
            )));
        }

        let touches_multiline = self.carry_into_cached(edit.start).is_inside_multiline()
            || self
                .lines
                .iter()
                .skip(edit.start)
                .take(edit.removed.max(1))
                .any(|l| l.end_state.is_inside_multiline());

        self.pending = Some(PendingEdit {
            edit,
            line_count,
            touches_multiline,
        });
        Ok(touches_multiline)
    }

    /// Bring the cache in line with an applied edit.
    ///
    /// Returns the number of lines that were reclassified.
    pub fn on_post_modify<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
        edit: EditRange,
    ) -> Result<usize> {
        let line_count = source.line_count();

        let edit = match self.pending.take() {
            Some(pending) if pending.edit == edit => {
                let expected = pending.line_count - edit.removed + edit.inserted;
                if expected != line_count {
                    self.invalidate_from(edit.start);
                    return Err(HighlightError::InvalidInput(format!(
                        "expected {} lines after edit, buffer has {}",
                        expected, line_count
                    )));
                }
                if pending.touches_multiline {
                    tracing::debug!(?edit, "edit touches a multi-line construct");
                }
                edit
            }
            Some(pending) => {
                self.invalidate_from(pending.edit.start.min(edit.start));
                return Err(HighlightError::InvalidInput(format!(
                    "post-modify {:?} does not match pre-modify {:?}",
                    edit, pending.edit
                )));
            }
            // No snapshot: lines after a splice can't be shifted reliably
            None if edit.kind() != EditKind::Change => {
                tracing::debug!(?edit, "post-modify without snapshot, dropping cache tail");
                self.invalidate_from(edit.start);
                return Ok(0);
            }
            None => edit,
        };

        if edit.start + edit.inserted > line_count {
            self.invalidate_from(edit.start);
            return Err(HighlightError::InvalidInput(format!(
                "edited lines {:?} outside buffer of {} lines",
                edit.new_lines(),
                line_count
            )));
        }
        if edit.start >= self.lines.len() {
            // Nothing cached at or after the edit
            return Ok(0);
        }

        let mut rest = self.lines.split_off(edit.start);
        let stale = edit.removed.min(rest.len());
        rest.drain(..stale);

        let mut recomputed = 0;
        for idx in edit.new_lines() {
            let computed = self.compute_line(source, idx, self.carry_into(idx))?;
            self.lines.push(computed);
            recomputed += 1;
        }

        let mut rest = rest.into_iter();
        while let Some(old) = rest.next() {
            let idx = self.lines.len();
            let carry = self.carry_into(idx);
            if old.start_state == carry {
                self.lines.push(old);
                self.lines.extend(&mut rest);
                break;
            }
            if idx >= line_count {
                break;
            }
            let computed = self.compute_line(source, idx, carry)?;
            self.lines.push(computed);
            recomputed += 1;
        }
        self.lines.truncate(line_count);

        tracing::debug!(?edit, recomputed, cached = self.lines.len(), "highlight cache updated");
        Ok(recomputed)
    }

    /// Carry state entering `line`; the line before it must be cached
    fn carry_into(&self, line: usize) -> LineState {
        match line {
            0 => LineState::default(),
            _ => self.lines[line - 1].end_state,
        }
    }

    /// Carry state entering `line`, normal if the previous line is not cached
    fn carry_into_cached(&self, line: usize) -> LineState {
        line.checked_sub(1)
            .and_then(|prev| self.line_state(prev))
            .unwrap_or_default()
    }

    fn compute_line<S: LineSource + ?Sized>(
        &self,
        source: &S,
        idx: usize,
        start_state: LineState,
    ) -> Result<CachedLine> {
        let text = source.line_text(idx).ok_or(HighlightError::OutOfRange {
            line: idx,
            line_count: source.line_count(),
        })?;
        match self.language.highlight_line(text, start_state) {
            Ok(result) => Ok(CachedLine {
                spans: result.spans,
                start_state,
                end_state: result.end_state,
            }),
            Err(e) => {
                tracing::warn!(line = idx, error = %e, "skipping highlight for line");
                Ok(CachedLine {
                    spans: Vec::new(),
                    start_state,
                    end_state: start_state,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builtin::zig_language;
    use crate::syntax::HighlightCategory;

    fn buffer(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn cache() -> LineCache {
        LineCache::new(Arc::new(zig_language()))
    }

    fn fill(cache: &mut LineCache, source: &Vec<String>) {
        if !source.is_empty() {
            cache.get_spans(source, source.len() - 1).unwrap();
        }
    }

    fn all_comment(cache: &mut LineCache, source: &Vec<String>, line: usize) -> bool {
        let text = source[line].clone();
        let spans = cache.get_spans(source, line).unwrap();
        spans.len() == 1 && spans[0].category == HighlightCategory::Comment && spans[0].len() == text.len()
    }

    #[test]
    fn test_lazy_fill_is_a_prefix() {
        let source = buffer(&["const a = 1;", "var b = 2;", "fn c() void {}"]);
        let mut cache = cache();
        assert_eq!(cache.cached_lines(), 0);

        let spans = cache.get_spans(&source, 1).unwrap();
        assert_eq!(spans[0], HighlightSpan::new(0, 3, HighlightCategory::Keyword));
        assert_eq!(cache.cached_lines(), 2);
        assert!(cache.cached_spans(2).is_none());
    }

    #[test]
    fn test_out_of_range() {
        let source = buffer(&["const a = 1;"]);
        let mut cache = cache();
        let err = cache.get_spans(&source, 1).unwrap_err();
        assert!(matches!(err, HighlightError::OutOfRange { line: 1, line_count: 1 }));
    }

    #[test]
    fn test_single_line_edit_recomputes_one_line() {
        let mut source = buffer(&["const a = 1;", "var b = 2;", "var c = 3;", "var d = 4;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        let edit = EditRange::single_line(1);
        cache.on_pre_modify(&source, edit).unwrap();
        source[1] = "var bb = 22;".to_string();
        assert_eq!(cache.on_post_modify(&source, edit).unwrap(), 1);

        let spans = cache.get_spans(&source, 1).unwrap();
        assert_eq!(spans[1], HighlightSpan::new(9, 11, HighlightCategory::Number));
        assert_eq!(cache.cached_lines(), 4);
    }

    #[test]
    fn test_opening_comment_propagates_to_end() {
        let mut source = buffer(&["const a = 1;", "var b = 2;", "var c = 3;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        let edit = EditRange::single_line(0);
        assert!(!cache.on_pre_modify(&source, edit).unwrap());
        source[0] = "const a = 1; /* open".to_string();
        assert_eq!(cache.on_post_modify(&source, edit).unwrap(), 3);
        assert!(all_comment(&mut cache, &source, 1));
        assert!(all_comment(&mut cache, &source, 2));
        assert_eq!(cache.line_state(2), Some(LineState::inside(1)));

        // closing it again restores the following lines
        let edit = EditRange::single_line(1);
        assert!(cache.on_pre_modify(&source, edit).unwrap());
        source[1] = "*/ var b = 2;".to_string();
        assert_eq!(cache.on_post_modify(&source, edit).unwrap(), 2);
        let spans = cache.get_spans(&source, 2).unwrap().to_vec();
        assert_eq!(spans[0], HighlightSpan::new(0, 3, HighlightCategory::Keyword));
        assert_eq!(cache.line_state(2), Some(LineState::default()));
    }

    #[test]
    fn test_comment_inside_comment_reaches_fixed_point() {
        let mut source = buffer(&["/*", "a", "b", "*/", "var x = 1;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        // editing a line inside the comment does not change any carry
        let edit = EditRange::single_line(1);
        cache.on_pre_modify(&source, edit).unwrap();
        source[1] = "aaa".to_string();
        assert_eq!(cache.on_post_modify(&source, edit).unwrap(), 1);
        assert!(all_comment(&mut cache, &source, 1));
    }

    #[test]
    fn test_post_modify_is_idempotent() {
        let mut source = buffer(&["const a = 1;", "var b = 2;", "/* c", "d */"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        let edit = EditRange::new(1, 1, 2);
        cache.on_pre_modify(&source, edit).unwrap();
        source.insert(2, "const e = @as(u8, 1);".to_string());
        cache.on_post_modify(&source, edit).unwrap();
        let once: Vec<_> = (0..source.len())
            .map(|i| cache.get_spans(&source, i).unwrap().to_vec())
            .collect();

        cache.on_post_modify(&source, edit).unwrap();
        let twice: Vec<_> = (0..source.len())
            .map(|i| cache.get_spans(&source, i).unwrap().to_vec())
            .collect();
        assert_eq!(once, twice);
        assert_eq!(cache.cached_lines(), source.len());
    }

    #[test]
    fn test_post_modify_without_snapshot_drops_shifted_lines() {
        let mut source = buffer(&["const a = 1;", "// c", "var b = 2;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        source.insert(0, "x".to_string());
        assert_eq!(cache.on_post_modify(&source, EditRange::new(0, 0, 1)).unwrap(), 0);
        assert_eq!(cache.cached_lines(), 0);

        let mut fresh = LineCache::new(Arc::clone(cache.language()));
        for line in 0..source.len() {
            let expected = fresh.get_spans(&source, line).unwrap().to_vec();
            assert_eq!(cache.get_spans(&source, line).unwrap(), expected.as_slice());
        }
        assert_eq!(
            cache.get_spans(&source, 1).unwrap(),
            &[
                HighlightSpan::new(0, 5, HighlightCategory::Keyword),
                HighlightSpan::new(10, 11, HighlightCategory::Number),
            ]
        );

        // same with a removed line
        source.remove(2);
        cache.on_post_modify(&source, EditRange::new(2, 1, 0)).unwrap();
        assert_eq!(cache.cached_lines(), 2);
        assert_eq!(
            cache.get_spans(&source, 2).unwrap()[0],
            HighlightSpan::new(0, 3, HighlightCategory::Keyword)
        );
    }

    #[test]
    fn test_post_modify_without_snapshot_refreshes_changed_line() {
        let mut source = buffer(&["const a = 1;", "var b = 2;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        source[0] = "// a".to_string();
        assert_eq!(cache.on_post_modify(&source, EditRange::single_line(0)).unwrap(), 1);
        assert!(all_comment(&mut cache, &source, 0));
        assert_eq!(cache.cached_lines(), 2);
    }

    #[test]
    fn test_line_insert_and_delete() {
        let mut source = buffer(&["/* a", "b */", "var c = 3;"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        // split "/* a" into "/*" and " a"
        let edit = EditRange::new(0, 1, 2);
        cache.on_pre_modify(&source, edit).unwrap();
        source[0] = "/*".to_string();
        source.insert(1, " a".to_string());
        cache.on_post_modify(&source, edit).unwrap();
        assert!(all_comment(&mut cache, &source, 1));
        assert_eq!(cache.cached_lines(), 4);

        // delete the closing line: the comment now runs to the end
        let edit = EditRange::new(2, 1, 0);
        cache.on_pre_modify(&source, edit).unwrap();
        source.remove(2);
        assert_eq!(cache.on_post_modify(&source, edit).unwrap(), 1);
        assert!(all_comment(&mut cache, &source, 2));
        assert_eq!(cache.cached_lines(), 3);
    }

    #[test]
    fn test_mismatched_line_count_is_invalid_input() {
        let mut source = buffer(&["a", "b", "c"]);
        let mut cache = cache();
        fill(&mut cache, &source);

        let edit = EditRange::single_line(1);
        cache.on_pre_modify(&source, edit).unwrap();
        source.push("d".to_string());
        let err = cache.on_post_modify(&source, edit).unwrap_err();
        assert!(matches!(err, HighlightError::InvalidInput(_)));
        assert_eq!(cache.cached_lines(), 1);

        // later reads recompute
        assert!(cache.get_spans(&source, 3).is_ok());
    }

    #[test]
    fn test_pre_modify_out_of_bounds() {
        let source = buffer(&["a"]);
        let mut cache = cache();
        let err = cache.on_pre_modify(&source, EditRange::new(1, 1, 1)).unwrap_err();
        assert!(matches!(err, HighlightError::InvalidInput(_)));
    }

    #[test]
    fn test_unclosed_comment_on_last_line() {
        let source = buffer(&["const a = 1;", "/* trailing"]);
        let mut cache = cache();
        assert!(all_comment(&mut cache, &source, 1));
        assert_eq!(cache.line_state(1), Some(LineState::inside(1)));
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let source = buffer(&["const a\nb", "var c = 1;"]);
        let mut cache = cache();
        assert!(cache.get_spans(&source, 0).unwrap().is_empty());
        assert!(!cache.get_spans(&source, 1).unwrap().is_empty());
    }
}
