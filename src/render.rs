//! Terminal rendering of highlighted lines using crossterm

use std::io::Write;
use std::ops::Range;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, HighlightCategory, ProjectedSpan, Style};

/// Map a palette color onto crossterm's
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}

/// Writes lines with their projected categories as styled terminal text
pub struct Renderer<W: Write> {
    out: W,
    tab_width: usize,
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, tab_width: usize) -> Self {
        Self {
            out,
            tab_width: tab_width.max(1),
            color: true,
        }
    }

    /// Builder: emit plain text only
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Render the visible columns of one line followed by a newline
    pub fn render_line(
        &mut self,
        text: &str,
        spans: &[ProjectedSpan],
        window: Range<usize>,
    ) -> Result<()> {
        let mut spans = spans.iter().peekable();
        let mut current: Option<HighlightCategory> = None;
        let mut col = 0;

        for ch in text.chars() {
            if col >= window.end {
                break;
            }
            let width = if ch == '\t' {
                self.tab_width - col % self.tab_width
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(1)
            };

            // characters straddling the window edge are not drawn
            if col >= window.start && col + width <= window.end {
                while spans.peek().map_or(false, |s| s.columns.end <= col) {
                    spans.next();
                }
                let category = spans
                    .peek()
                    .filter(|s| s.columns.start <= col)
                    .map(|s| s.category);
                if category != current {
                    self.set_category(category)?;
                    current = category;
                }
                if ch == '\t' {
                    queue!(self.out, Print(" ".repeat(width)))?;
                } else {
                    queue!(self.out, Print(ch))?;
                }
            }
            col += width;
        }

        if current.is_some() {
            self.set_category(None)?;
        }
        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    /// Flush queued output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_category(&mut self, category: Option<HighlightCategory>) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        if let Some(category) = category {
            self.apply_style(&category.default_style())?;
        }
        Ok(())
    }

    fn apply_style(&mut self, style: &Style) -> Result<()> {
        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(self.out, SetBackgroundColor(to_crossterm(style.bg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str, spans: &[ProjectedSpan], window: Range<usize>) -> String {
        let mut renderer = Renderer::new(Vec::new(), 4).without_color();
        renderer.render_line(text, spans, window).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_expands_tabs() {
        assert_eq!(plain("\tfn", &[], 0..80), "    fn\n");
    }

    #[test]
    fn test_plain_clips_to_window() {
        assert_eq!(plain("abcdefg", &[], 2..5), "cde\n");
        // a wide char cut by the window edge is dropped
        assert_eq!(plain("a你b", &[], 0..2), "a\n");
    }

    #[test]
    fn test_colored_output() {
        let spans = [ProjectedSpan {
            columns: 0..5,
            category: HighlightCategory::Keyword,
        }];
        let mut renderer = Renderer::new(Vec::new(), 4);
        renderer.render_line("const x", &spans, 0..80).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.starts_with('\x1b'));
        assert!(out.contains("const"));
        assert!(out.ends_with(" x\n"));
    }
}
