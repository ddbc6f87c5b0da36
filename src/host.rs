//! Host editor interface
//!
//! Traits and event types a host editor adapter implements or sends.
//! The highlighting core only reads line text through [`LineSource`] and
//! reacts to the four lifecycle hooks of [`HighlightHooks`].

use std::ops::Range;

use crate::syntax::ProjectedSpan;

/// Read access to the lines of a buffer
pub trait LineSource {
    /// Number of lines in the buffer
    fn line_count(&self) -> usize;

    /// Text of one line, without its line terminator
    fn line_text(&self, idx: usize) -> Option<&str>;
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|s| s.as_str())
    }
}

/// What a buffer is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferKind {
    /// Backed by (or destined for) a file on disk
    #[default]
    File,
    /// Scratch text not tied to a file
    Scratch,
    /// Editor-internal buffer (messages, lists)
    Special,
}

/// A host buffer as seen by the highlighting hooks
pub trait HostBuffer: LineSource {
    fn kind(&self) -> BufferKind;

    /// Filetype tag, if the host has resolved one
    fn filetype(&self) -> Option<&str>;
}

/// Identifies a buffer across hook calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// Shape of an edit, derived from its line counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Lines rewritten in place
    Change,
    /// Net lines added
    Insert,
    /// Net lines removed
    Delete,
}

/// A line splice: `removed` lines starting at `start` (pre-edit
/// numbering) are replaced by `inserted` lines (post-edit numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl EditRange {
    pub fn new(start: usize, removed: usize, inserted: usize) -> Self {
        Self {
            start,
            removed,
            inserted,
        }
    }

    /// Edit confined to a single line
    pub fn single_line(line: usize) -> Self {
        Self::new(line, 1, 1)
    }

    pub fn kind(&self) -> EditKind {
        match self.inserted.cmp(&self.removed) {
            std::cmp::Ordering::Equal => EditKind::Change,
            std::cmp::Ordering::Greater => EditKind::Insert,
            std::cmp::Ordering::Less => EditKind::Delete,
        }
    }

    /// Pre-edit lines touched by the edit
    pub fn old_lines(&self) -> Range<usize> {
        self.start..self.start + self.removed
    }

    /// Post-edit lines produced by the edit
    pub fn new_lines(&self) -> Range<usize> {
        self.start..self.start + self.inserted
    }
}

/// Sent once per visible frame before it is drawn
#[derive(Debug)]
pub struct FrameDrawEvent<'a, B: ?Sized> {
    pub buffer_id: BufferId,
    pub buffer: Option<&'a B>,
    /// Visible buffer lines
    pub lines: Range<usize>,
    /// Visible display columns
    pub columns: Range<usize>,
}

/// Sent for each visible line before it is drawn
#[derive(Debug)]
pub struct LineDrawEvent<'a, B: ?Sized> {
    pub buffer_id: BufferId,
    pub buffer: Option<&'a B>,
    pub line: usize,
    /// Visible display columns
    pub columns: Range<usize>,
}

/// Sent before and after a buffer modification
#[derive(Debug)]
pub struct ModifyEvent<'a, B: ?Sized> {
    pub buffer_id: BufferId,
    pub buffer: Option<&'a B>,
    pub edit: EditRange,
}

/// The editor lifecycle hooks a highlighter responds to
pub trait HighlightHooks<B: HostBuffer + ?Sized> {
    fn on_frame_pre_draw(&mut self, event: &FrameDrawEvent<'_, B>);

    /// Returns the categories to paint over the visible columns
    fn on_line_pre_draw(&mut self, event: &LineDrawEvent<'_, B>) -> Vec<ProjectedSpan>;

    fn on_pre_modify(&mut self, event: &ModifyEvent<'_, B>);

    fn on_post_modify(&mut self, event: &ModifyEvent<'_, B>);
}
