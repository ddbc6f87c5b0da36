//! Zig language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{DelimitedRule, LexRule, MultilineRule, NumberRule};
use crate::syntax::tokens::HighlightCategory;

/// Filetype tag buffers carry when they hold Zig source
pub const ZIG_FILETYPE: &str = "Zig";

const KEYWORDS: &[&str] = &[
    "asm", "comptime", "enum", "export", "extern", "fn", "pub", "struct", "test", "union",
    "usingnamespace", "volatile", "var", "const",
];

const SPECIAL_KEYWORDS: &[&str] = &[
    "defer", "callconv", "linksection", "catch", "resume", "try", "async", "await", "suspend",
    "inline", "noalias", "nosuspend", "noinline", "opaque", "packed", "errdefer", "error",
    "threadlocal", "unreachable", "align", "allowzero", "anyframe",
];

const CONTROL_FLOW: &[&str] = &[
    "continue", "break", "for", "if", "else", "or", "orelse", "switch", "and", "while", "return",
];

const TYPE_NAMES: &[&str] = &[
    "i8", "u8", "i16", "u16", "i32", "u32", "i64", "u64", "i128", "u128", "isize", "usize",
    "c_short", "c_ushort", "c_int", "c_uint", "c_long", "c_ulong", "c_longlong", "c_ulonglong",
    "c_longdouble", "c_void", "f16", "f32", "f64", "f128", "bool", "void", "noreturn", "type",
    "anyerror", "comptime_int", "comptime_float", "anytype",
];

const CONSTANTS: &[&str] = &[
    "null", "undefined", "true", "false", "stdin", "stdout", "stderr",
];

/// Create Zig language definition
pub fn zig_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(ZIG_FILETYPE);
    lang.add_extension("zig");
    lang.add_extension("zon");

    lang.add_keywords(KEYWORDS, HighlightCategory::Keyword);
    lang.add_keywords(SPECIAL_KEYWORDS, HighlightCategory::PreprocessorLike);
    lang.add_keywords(CONTROL_FLOW, HighlightCategory::ControlFlow);
    lang.add_keywords(TYPE_NAMES, HighlightCategory::Type);
    lang.add_keywords(CONSTANTS, HighlightCategory::Constant);

    // @import, @as, ...
    lang.add_rule(LexRule::PrefixedWord {
        sigil: '@',
        category: HighlightCategory::PreprocessorLike,
    });
    lang.add_rule(LexRule::SuffixedWord {
        marker: '(',
        category: HighlightCategory::Call,
    });
    if let Some(rule) = NumberRule::standard() {
        lang.add_rule(LexRule::Numbers(rule));
    }

    lang.add_rule(LexRule::Delimited(DelimitedRule::new(
        "\"",
        "\"",
        Some('\\'),
        None,
        HighlightCategory::String,
    )));
    lang.add_rule(LexRule::Delimited(DelimitedRule::new(
        "'",
        "'",
        Some('\\'),
        Some(1),
        HighlightCategory::Char,
    )));

    lang.add_rule(LexRule::ToEndOfLine {
        marker: "//".to_string(),
        category: HighlightCategory::Comment,
    });
    // Multiline string literal lines
    lang.add_rule(LexRule::ToEndOfLine {
        marker: "\\\\".to_string(),
        category: HighlightCategory::String,
    });
    if let Some(rule) = MultilineRule::new("block_comment", "/*", "*/", HighlightCategory::Comment, 1) {
        lang.add_rule(LexRule::Multiline(rule));
    }

    lang
}
