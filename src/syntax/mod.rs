//! Syntax highlighting module
//!
//! This module provides the highlighting core:
//! - Lexical classification of single lines
//! - Incremental per-buffer caching of spans and carry state
//! - Projection of cached spans onto screen columns
//! - The hook-driven manager a host editor talks to

mod style;
mod tokens;
mod keywords;
mod rules;
mod language;
mod cache;
mod projector;
mod manager;
pub mod builtin;

pub use style::{segments, spans_well_formed, Color, HighlightSpan, Style};
pub use tokens::HighlightCategory;
pub use keywords::KeywordSet;
pub use rules::{DelimitedRule, HighlightResult, LexRule, LineState, MultilineRule, NumberRule};
pub use language::{classify_line, LanguageDefinition};
pub use cache::LineCache;
pub use projector::{ProjectedSpan, Projector};
pub use manager::SyntaxManager;
