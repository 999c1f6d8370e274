use regex::Regex;
use std::sync::OnceLock;

/// Characters that make up a word token.
pub const WORD_PATTERN: &str = r"[A-Za-z0-9_$]+";

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(WORD_PATTERN).expect("word pattern should always compile"))
}

/// Returns true for characters that can appear inside a word token.
#[inline]
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Lazy iterator over the word tokens of a text, left to right.
///
/// Occurrence order and multiplicity are preserved. Cloning the iterator
/// restarts the scan from the clone's current position, and calling
/// [`tokens`] again restarts it from the beginning.
#[derive(Debug, Clone)]
pub struct Tokens<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Tokens<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let found = word_regex().find_at(self.text, self.pos)?;
        self.pos = found.end();
        Some(found.as_str())
    }
}

/// Tokenizes `text` into maximal runs of `[A-Za-z0-9_$]`.
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}
