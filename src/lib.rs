//! # Mangle - Cross-File Identifier Renaming
//!
//! Shrinks a set of text files by renaming every word marked with a trailing
//! underscore (`count_`, `list_`) to a short generated identifier, consistently
//! across all files.
//!
//! The pipeline has four stages:
//! 1. **Classification**: tokens are split into Target words (marked, counted)
//!    and Other words (must never be produced as replacements).
//! 2. **Alphabet**: per-position character sets, either configured or derived
//!    from the letters most common in the corpus.
//! 3. **Planning**: each Target word gets the shortest free identifier, most
//!    frequent words first.
//! 4. **Substitution**: whole-word replacement in every file, longest original
//!    first.
//!
//! ## Example
//!
//! ```
//! use mangle_rs::{FileBuffer, RenameConfig, Renamer};
//!
//! let mut files = vec![FileBuffer::new("app.js", "zig_ zig_ zig_ boston_ boston_ apple")];
//! let renamer = Renamer::new(RenameConfig::default().with_alphabet(["ab"]));
//!
//! let stats = renamer.rename(&mut files).unwrap();
//! assert_eq!(files[0].content, "a a a b b apple");
//! assert_eq!(stats.targets, 2);
//! ```
//!
//! ## Guarantees
//!
//! - Replacements are unique, never start with a digit, and never equal an
//!   Other word, a reserved word or a Target word.
//! - Running again on the output renames nothing, as long as the alphabet
//!   does not contain `_`.
//! - Files are only written after every file has been read and planning has
//!   succeeded.

mod alphabet;
mod classify;
mod config;
mod engine;
mod error;
pub mod files;
mod id_gen;
mod planner;
mod reserved;
mod substitute;
mod tokenizer;


pub use alphabet::{Alphabet, LetterFrequency, DEFAULT_COVERAGE_PERCENT};
pub use classify::{Classification, TargetEntry, TargetKey, TargetRule};
pub use config::RenameConfig;
pub use engine::{RenameStats, Renamer};
pub use error::{ConfigError, Error, Result};
pub use files::FileBuffer;
pub use id_gen::identifier_at;
pub use planner::{plan, Replacement, ReplacementPlan};
pub use reserved::{is_reserved, RESERVED_WORDS};
pub use substitute::{
    application_order, find_whole_words, replace_whole_words, substitute, SubstitutionReport,
};
pub use tokenizer::{is_token_char, tokens, Tokens, WORD_PATTERN};
