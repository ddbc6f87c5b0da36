//! Highlight categories
//!
//! This module defines the semantic classes a span of source text can
//! be assigned and their default visual styles.

use super::style::{Color, Style};

/// Semantic class assigned to a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    /// Declaration keywords (const, fn, struct, ...)
    Keyword,
    /// Builtins and special keywords (@import, defer, try, ...)
    PreprocessorLike,
    /// Control flow keywords (if, while, return, ...)
    ControlFlow,
    /// Primitive type names (u8, usize, bool, ...)
    Type,
    /// Named constants (null, true, undefined, ...)
    Constant,
    /// Identifier used as a call site
    Call,
    /// String literals
    String,
    /// Character literals
    Char,
    /// Line and block comments
    Comment,
    /// Numeric literals
    Number,
}

impl HighlightCategory {
    /// All categories, in declaration order
    pub const ALL: [HighlightCategory; 10] = [
        HighlightCategory::Keyword,
        HighlightCategory::PreprocessorLike,
        HighlightCategory::ControlFlow,
        HighlightCategory::Type,
        HighlightCategory::Constant,
        HighlightCategory::Call,
        HighlightCategory::String,
        HighlightCategory::Char,
        HighlightCategory::Comment,
        HighlightCategory::Number,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            HighlightCategory::Keyword => Style::fg(Color::Magenta).with_bold(),
            HighlightCategory::PreprocessorLike => Style::fg(Color::BrightMagenta),
            HighlightCategory::ControlFlow => Style::fg(Color::Yellow).with_bold(),
            HighlightCategory::Type => Style::fg(Color::BrightBlue),
            HighlightCategory::Constant => Style::fg(Color::BrightRed),
            HighlightCategory::Call => Style::fg(Color::Blue),
            HighlightCategory::String => Style::fg(Color::Green),
            HighlightCategory::Char => Style::fg(Color::BrightGreen),
            HighlightCategory::Comment => Style::fg(Color::BrightBlack).with_italic(),
            HighlightCategory::Number => Style::fg(Color::Cyan),
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            HighlightCategory::Keyword => "Keyword",
            HighlightCategory::PreprocessorLike => "PreprocessorLike",
            HighlightCategory::ControlFlow => "ControlFlow",
            HighlightCategory::Type => "Type",
            HighlightCategory::Constant => "Constant",
            HighlightCategory::Call => "Call",
            HighlightCategory::String => "String",
            HighlightCategory::Char => "Char",
            HighlightCategory::Comment => "Comment",
            HighlightCategory::Number => "Number",
        }
    }

    /// Parse a category from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keyword" => Some(HighlightCategory::Keyword),
            "PreprocessorLike" | "Preprocessor" => Some(HighlightCategory::PreprocessorLike),
            "ControlFlow" => Some(HighlightCategory::ControlFlow),
            "Type" => Some(HighlightCategory::Type),
            "Constant" => Some(HighlightCategory::Constant),
            "Call" => Some(HighlightCategory::Call),
            "String" => Some(HighlightCategory::String),
            "Char" => Some(HighlightCategory::Char),
            "Comment" => Some(HighlightCategory::Comment),
            "Number" => Some(HighlightCategory::Number),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_is_styled() {
        for category in HighlightCategory::ALL {
            assert!(!category.default_style().is_default(), "{}", category.name());
        }
    }

    #[test]
    fn test_from_name_accepts_every_name() {
        for category in HighlightCategory::ALL {
            assert_eq!(HighlightCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(
            HighlightCategory::from_name("Preprocessor"),
            Some(HighlightCategory::PreprocessorLike)
        );
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(HighlightCategory::from_name("keyword"), None);
        assert_eq!(HighlightCategory::from_name(""), None);
    }
}
