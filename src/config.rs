//! Configuration file support
//!
//! Loads settings from ~/.zighl.toml (or %USERPROFILE%\.zighl.toml on
//! Windows), or from a path given on the command line.
//!
//! Example:
//! ```text
//! # zighl configuration
//! enabled = true
//! filetype = "Zig"
//! tab-width = 4
//!
//! [keywords]
//! Constant = ["std"]
//! Type = ["Allocator"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{HighlightError, Result};
use crate::syntax::builtin::ZIG_FILETYPE;
use crate::syntax::HighlightCategory;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether highlighting is enabled
    pub enabled: bool,
    /// Filetype tag the hooks activate for
    pub filetype: String,
    /// Tab width for column projection
    pub tab_width: usize,
    /// Extra words added to the language's keyword set
    pub extra_keywords: Vec<(String, HighlightCategory)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            filetype: ZIG_FILETYPE.to_string(),
            tab_width: 8,
            extra_keywords: Vec::new(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".zighl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".zighl.toml"))
        }
    }

    /// Load configuration from the default path; a missing file gives defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Config::default();
        config.apply(&Self::parse(&contents)?)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents into a TOML table
    pub fn parse(contents: &str) -> Result<Table> {
        contents
            .parse::<Table>()
            .map_err(|e| HighlightError::Config(e.to_string()))
    }

    /// Apply settings from a parsed table
    pub fn apply(&mut self, settings: &Table) -> Result<()> {
        if let Some(value) = settings.get("enabled") {
            self.enabled = value
                .as_bool()
                .ok_or_else(|| bad_value("enabled", value))?;
        }

        if let Some(value) = settings.get("filetype") {
            let filetype = value.as_str().ok_or_else(|| bad_value("filetype", value))?;
            if filetype.is_empty() {
                return Err(bad_value("filetype", value));
            }
            self.filetype = filetype.to_string();
        }

        if let Some(value) = settings.get("tab-width") {
            let n = value.as_integer().ok_or_else(|| bad_value("tab-width", value))?;
            self.tab_width = n.clamp(1, 16) as usize;
        }

        if let Some(value) = settings.get("keywords") {
            let table = value.as_table().ok_or_else(|| bad_value("keywords", value))?;
            for (name, words) in table {
                let category = HighlightCategory::from_name(name).ok_or_else(|| {
                    HighlightError::Config(format!("unknown highlight category `{}`", name))
                })?;
                let words = words
                    .as_array()
                    .ok_or_else(|| bad_value(&format!("keywords.{}", name), words))?;
                for word in words {
                    let word = word
                        .as_str()
                        .ok_or_else(|| bad_value(&format!("keywords.{}", name), word))?;
                    self.extra_keywords.push((word.to_string(), category));
                }
            }
        }

        Ok(())
    }
}

fn bad_value(key: &str, value: &Value) -> HighlightError {
    HighlightError::Config(format!("invalid value for `{}`: {}", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let contents = r#"
# Comment
enabled = false
filetype = "zig"
tab-width = 4

[keywords]
Constant = ["std"]
Type = ["Allocator", "ArrayList"]
        "#;

        let mut config = Config::default();
        config.apply(&Config::parse(contents).unwrap()).unwrap();

        assert!(!config.enabled);
        assert_eq!(config.filetype, "zig");
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.extra_keywords.len(), 3);
        assert!(config
            .extra_keywords
            .contains(&("std".to_string(), HighlightCategory::Constant)));
        assert!(config
            .extra_keywords
            .contains(&("ArrayList".to_string(), HighlightCategory::Type)));
    }

    #[test]
    fn test_tab_width_is_clamped() {
        let mut config = Config::default();
        config.apply(&Config::parse("tab-width = 100").unwrap()).unwrap();
        assert_eq!(config.tab_width, 16);
        config.apply(&Config::parse("tab-width = 0").unwrap()).unwrap();
        assert_eq!(config.tab_width, 1);
    }

    #[test]
    fn test_defaults_when_empty() {
        let mut config = Config::default();
        config.apply(&Config::parse("").unwrap()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.filetype, "Zig");
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut config = Config::default();
        let table = Config::parse("[keywords]\nFancy = [\"x\"]").unwrap();
        assert!(matches!(config.apply(&table), Err(HighlightError::Config(_))));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let mut config = Config::default();
        let table = Config::parse("enabled = \"yes\"").unwrap();
        assert!(matches!(config.apply(&table), Err(HighlightError::Config(_))));

        assert!(matches!(Config::parse("tab-width = "), Err(HighlightError::Config(_))));
    }
}
