//! Built-in language definitions

mod zig;

use super::language::LanguageDefinition;

pub use zig::{zig_language, ZIG_FILETYPE};

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![zig::zig_language()]
}
