//! Buffer representation - a collection of lines with associated metadata
//!
//! This is the reference host buffer: edits go through [`Buffer::edit_with_hooks`],
//! which brackets each change with the pre/post modify hooks.

use std::path::{Path, PathBuf};

use crate::error::{HighlightError, Result};
use crate::host::{BufferId, BufferKind, EditRange, HighlightHooks, HostBuffer, LineSource, ModifyEvent};
use crate::line::Line;

/// A single buffer modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert text at a position; the text may contain newlines
    InsertStr { line: usize, byte: usize, text: String },
    /// Split a line at a position
    InsertNewline { line: usize, byte: usize },
    /// Delete bytes `start..end` of one line
    DeleteRange { line: usize, start: usize, end: usize },
    /// Join a line with the one after it
    JoinLine { line: usize },
    /// Remove a line (the last remaining line is cleared instead)
    DeleteLine { line: usize },
}

/// A buffer containing text and metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Buffer name (e.g., "main.zig", "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// What the buffer is used for
    kind: BufferKind,
    /// Resolved filetype tag
    filetype: Option<String>,
    /// Whether buffer has unsaved changes
    modified: bool,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::new()], // Always have at least one line
            name: name.into(),
            filename: None,
            kind: BufferKind::File,
            filetype: None,
            modified: false,
        }
    }

    /// Create a buffer holding the given lines
    pub fn from_lines(name: impl Into<String>, lines: &[&str]) -> Self {
        let mut buffer = Self::new(name);
        if !lines.is_empty() {
            buffer.lines = lines.iter().map(|&l| Line::from(l)).collect();
        }
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::new(name);
        // lines() also strips the \r of CRLF endings
        let lines: Vec<Line> = content.lines().map(Line::from).collect();
        if !lines.is_empty() {
            buffer.lines = lines;
        }
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_kind(&mut self, kind: BufferKind) {
        self.kind = kind;
    }

    pub fn set_filetype(&mut self, filetype: Option<String>) {
        self.filetype = filetype;
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Describe the lines an edit will touch, validating it first
    pub fn edit_range(&self, edit: &Edit) -> Result<EditRange> {
        let line_idx = match *edit {
            Edit::InsertStr { line, .. }
            | Edit::InsertNewline { line, .. }
            | Edit::DeleteRange { line, .. }
            | Edit::JoinLine { line }
            | Edit::DeleteLine { line } => line,
        };
        let line = self.lines.get(line_idx).ok_or(HighlightError::OutOfRange {
            line: line_idx,
            line_count: self.lines.len(),
        })?;
        let check = |pos: usize| {
            if pos <= line.len() && line.is_boundary(pos) {
                Ok(())
            } else {
                Err(HighlightError::InvalidInput(format!(
                    "byte {} is not a character boundary of line {}",
                    pos, line_idx
                )))
            }
        };

        match edit {
            Edit::InsertStr { byte, text, .. } => {
                check(*byte)?;
                let new_lines = text.matches('\n').count();
                Ok(EditRange::new(line_idx, 1, 1 + new_lines))
            }
            Edit::InsertNewline { byte, .. } => {
                check(*byte)?;
                Ok(EditRange::new(line_idx, 1, 2))
            }
            Edit::DeleteRange { start, end, .. } => {
                check(*start)?;
                check(*end)?;
                if start > end {
                    return Err(HighlightError::invalid("delete range ends before it starts"));
                }
                Ok(EditRange::single_line(line_idx))
            }
            Edit::JoinLine { .. } => {
                if line_idx + 1 >= self.lines.len() {
                    return Err(HighlightError::invalid("no line to join with"));
                }
                Ok(EditRange::new(line_idx, 2, 1))
            }
            Edit::DeleteLine { .. } if self.lines.len() == 1 => Ok(EditRange::single_line(0)),
            Edit::DeleteLine { .. } => Ok(EditRange::new(line_idx, 1, 0)),
        }
    }

    /// Apply an edit without notifying anyone
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<EditRange> {
        let range = self.edit_range(edit)?;
        match edit {
            Edit::InsertStr { line, byte, text } => {
                let tail = self.lines[*line].split_off(*byte);
                let mut pieces = text.split('\n');
                if let Some(first) = pieces.next() {
                    let end = self.lines[*line].len();
                    self.lines[*line].insert_str(end, first);
                }
                let mut idx = *line;
                for piece in pieces {
                    idx += 1;
                    self.lines.insert(idx, Line::from(piece));
                }
                self.lines[idx].append(tail);
            }
            Edit::InsertNewline { line, byte } => {
                let new_line = self.lines[*line].split_off(*byte);
                self.lines.insert(line + 1, new_line);
            }
            Edit::DeleteRange { line, start, end } => {
                self.lines[*line].delete_range(*start, *end);
            }
            Edit::JoinLine { line } => {
                let next_line = self.lines.remove(line + 1);
                self.lines[*line].append(next_line);
            }
            Edit::DeleteLine { line } => {
                if self.lines.len() == 1 {
                    self.lines[0].clear();
                } else {
                    self.lines.remove(*line);
                }
            }
        }
        self.modified = true;
        Ok(range)
    }

    /// Apply an edit, firing the pre- and post-modify hooks around it
    pub fn edit_with_hooks<H>(&mut self, id: BufferId, hooks: &mut H, edit: &Edit) -> Result<EditRange>
    where
        H: HighlightHooks<Buffer> + ?Sized,
    {
        let range = self.edit_range(edit)?;
        hooks.on_pre_modify(&ModifyEvent {
            buffer_id: id,
            buffer: Some(&*self),
            edit: range,
        });
        self.apply_edit(edit)?;
        hooks.on_post_modify(&ModifyEvent {
            buffer_id: id,
            buffer: Some(&*self),
            edit: range,
        });
        Ok(range)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        let mut buffer = Self::new("*scratch*");
        buffer.kind = BufferKind::Scratch;
        buffer
    }
}

impl LineSource for Buffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|l| l.text())
    }
}

impl HostBuffer for Buffer {
    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn filetype(&self) -> Option<&str> {
        self.filetype.as_deref()
    }
}
