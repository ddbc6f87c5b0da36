//! zig-syntax - table-driven Zig syntax highlighting
//!
//! Classifies Zig source lines into highlight categories, keeps the
//! result cached per buffer in step with edits, and projects it onto
//! the visible columns at draw time. A host editor drives everything
//! through the four hooks of [`host::HighlightHooks`].

pub mod buffer;
pub mod config;
pub mod error;
pub mod host;
pub mod line;
pub mod render;
pub mod syntax;

pub use error::{HighlightError, Result};
