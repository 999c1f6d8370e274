//! Error types for the renaming pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with the alphabet or the run configuration.
///
/// Always raised before any file is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicit alphabet was supplied with no groups at all.
    #[error("explicit alphabet has no character groups")]
    NoGroups,

    /// A position reachable by generation has no characters.
    #[error("alphabet position {position} has an empty character set")]
    EmptyGroup {
        /// Index into the effective alphabet.
        position: usize,
    },

    /// No explicit alphabet was given and the corpus has no letters to derive one from.
    #[error("cannot derive an alphabet: corpus contains no letters outside replacement targets")]
    EmptyDerivedAlphabet,

    /// A group contains a character that cannot appear in an identifier.
    #[error("alphabet group {group} contains {ch:?}, which is not an identifier character")]
    InvalidCharacter {
        /// Offending character.
        ch: char,
        /// Index of the group as supplied.
        group: usize,
    },

    /// Coverage for derived alphabets must be a percentage in 1..=100.
    #[error("coverage percentage {0} is outside 1..=100")]
    Coverage(u8),
}

/// Everything that can abort a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is neither UTF-8 nor BOM-marked UTF-16.
    #[error("{}: unsupported text encoding", .path.display())]
    Decode { path: PathBuf },

    #[error("{}: invalid configuration file: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no input files matched")]
    NoInputFiles,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
