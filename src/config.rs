use crate::alphabet::DEFAULT_COVERAGE_PERCENT;
use crate::classify::TargetRule;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings for one renaming run.
///
/// Can be loaded from TOML:
///
/// ```toml
/// alphabet = ["abc", "xyz"]
/// reserved = ["jQuery", "module"]
/// coverage_percent = 80
/// target_rule = "single-trailing-underscore"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Explicit character groups. `None` derives the alphabet from the corpus.
    pub alphabet: Option<Vec<String>>,
    /// Words to protect in addition to the built-in reserved words.
    pub reserved: Vec<String>,
    /// Share of letter frequency a derived alphabet must cover.
    pub coverage_percent: u8,
    pub target_rule: TargetRule,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            alphabet: None,
            reserved: Vec::new(),
            coverage_percent: DEFAULT_COVERAGE_PERCENT,
            target_rule: TargetRule::default(),
        }
    }
}

impl RenameConfig {
    /// Uses an explicit alphabet.
    pub fn with_alphabet<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alphabet = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Adds words that must never be generated.
    pub fn with_reserved<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_target_rule(mut self, rule: TargetRule) -> Self {
        self.target_rule = rule;
        self
    }

    /// Parses a TOML document. `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ConfigFile {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text, path)
    }
}
