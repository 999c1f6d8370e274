use crate::alphabet::LetterFrequency;
use crate::reserved::is_reserved;
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use serde::Deserialize;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to a [`TargetEntry`] stored in a [`Classification`].
    pub struct TargetKey;
}

/// Which words count as replacement candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRule {
    /// At least two characters, last one `_`. `foo_` and `foo__` both qualify.
    #[default]
    TrailingUnderscore,

    /// Like [`TargetRule::TrailingUnderscore`], but the character before the
    /// final `_` must not itself be `_`. `foo__` is left alone.
    SingleTrailingUnderscore,
}

impl TargetRule {
    /// Returns true if `word` is a replacement candidate under this rule.
    pub fn is_target(self, word: &str) -> bool {
        let mut rev = word.chars().rev();
        match (rev.next(), rev.next()) {
            (Some('_'), Some(prev)) => match self {
                TargetRule::TrailingUnderscore => true,
                TargetRule::SingleTrailingUnderscore => prev != '_',
            },
            _ => false,
        }
    }
}

/// A word marked for replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    /// The word as it appears in the corpus.
    pub original: String,
    /// Number of occurrences across the corpus.
    pub frequency: u64,
    /// Token index of the first occurrence, used to break ties.
    pub first_seen: usize,
}

/// Partition of a token stream into Target and Other words.
///
/// Targets are stored in a `SlotMap` keyed by [`TargetKey`] with a string
/// index on top. Built-in reserved words count as Other words whether or not
/// they occur.
#[derive(Debug)]
pub struct Classification {
    rule: TargetRule,
    tally_letters: bool,
    pub(crate) targets: SlotMap<TargetKey, TargetEntry>,
    target_index: HashMap<String, TargetKey>,
    others: HashSet<String>,
    letters: LetterFrequency,
    tokens_seen: usize,
}

impl Classification {
    /// Creates an empty classification.
    ///
    /// When `tally_letters` is false the letter table stays empty; this is the
    /// case whenever an explicit alphabet is configured.
    pub fn new(rule: TargetRule, tally_letters: bool) -> Self {
        Self {
            rule,
            tally_letters,
            targets: SlotMap::with_key(),
            target_index: HashMap::new(),
            others: HashSet::new(),
            letters: LetterFrequency::default(),
            tokens_seen: 0,
        }
    }

    /// Adds extra words that must never be used as replacements.
    pub fn reserve<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.others.extend(words.into_iter().map(Into::into));
    }

    /// Classifies a single token.
    pub fn push(&mut self, token: &str) {
        let index = self.tokens_seen;
        self.tokens_seen += 1;

        if self.rule.is_target(token) {
            if let Some(&key) = self.target_index.get(token) {
                self.targets[key].frequency += 1;
            } else {
                let key = self.targets.insert(TargetEntry {
                    original: token.to_string(),
                    frequency: 1,
                    first_seen: index,
                });
                self.target_index.insert(token.to_string(), key);
            }
            return;
        }

        if self.tally_letters {
            self.letters.record_word(token);
        }
        if !self.others.contains(token) {
            self.others.insert(token.to_string());
        }
    }

    /// Classifies every token of an iterator.
    pub fn extend<'a, I: IntoIterator<Item = &'a str>>(&mut self, tokens: I) {
        for token in tokens {
            self.push(token);
        }
    }

    /// Number of tokens classified so far.
    pub fn tokens_seen(&self) -> usize {
        self.tokens_seen
    }

    /// Number of distinct Target words.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Looks up a Target entry by its original spelling.
    pub fn target(&self, word: &str) -> Option<&TargetEntry> {
        self.target_index.get(word).map(|&key| &self.targets[key])
    }

    /// Iterates Target entries in no particular order.
    pub fn targets(&self) -> impl Iterator<Item = (TargetKey, &TargetEntry)> {
        self.targets.iter()
    }

    /// Returns true if `word` is an Other word or a reserved word.
    pub fn is_other(&self, word: &str) -> bool {
        is_reserved(word) || self.others.contains(word)
    }

    /// Other words seen in the corpus plus extra reserved words. The built-in
    /// list is not copied in; [`Classification::is_other`] consults it.
    pub fn others(&self) -> &HashSet<String> {
        &self.others
    }

    /// Letter frequencies of the Other words seen in the corpus.
    pub fn letters(&self) -> &LetterFrequency {
        &self.letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokens;

    #[test]
    fn test_target_predicate() {
        let rule = TargetRule::TrailingUnderscore;
        assert!(rule.is_target("a_"));
        assert!(rule.is_target("foo_"));
        assert!(rule.is_target("foo__"));
        assert!(rule.is_target("__"));
        assert!(!rule.is_target("_"));
        assert!(!rule.is_target("foo"));
        assert!(!rule.is_target("_foo"));
        assert!(!rule.is_target(""));
    }

    #[test]
    fn test_single_trailing_rule() {
        let rule = TargetRule::SingleTrailingUnderscore;
        assert!(rule.is_target("foo_"));
        assert!(!rule.is_target("foo__"));
        assert!(!rule.is_target("__"));
    }

    #[test]
    fn test_counts_targets_and_records_others() {
        let mut c = Classification::new(TargetRule::default(), true);
        c.extend(tokens("zig_ zig_ zig_ boston_ boston_ apple"));

        assert_eq!(c.tokens_seen(), 6);
        assert_eq!(c.target_count(), 2);
        assert_eq!(c.target("zig_").map(|t| t.frequency), Some(3));
        assert_eq!(c.target("boston_").map(|t| t.frequency), Some(2));
        assert_eq!(c.target("boston_").map(|t| t.first_seen), Some(3));
        assert!(c.is_other("apple"));
        assert!(!c.is_other("zig_"));
    }

    #[test]
    fn test_reserved_words_always_present() {
        let mut c = Classification::new(TargetRule::default(), true);
        c.extend(tokens("x_"));
        assert!(c.is_other("function"));
        assert!(c.is_other("if"));
        assert!(!c.others().contains("if"));
        assert_eq!(c.letters().total(), 0);
    }

    #[test]
    fn test_extra_reserved() {
        let mut c = Classification::new(TargetRule::default(), false);
        c.reserve(["jQuery", "module"]);
        assert!(c.is_other("jQuery"));
        assert!(c.is_other("module"));
    }

    #[test]
    fn test_letter_tally_only_for_other_words() {
        let mut c = Classification::new(TargetRule::default(), true);
        c.extend(tokens("aab_ ab a1$_b"));
        // "a1$_b" ends in 'b', so it is an Other word.
        assert_eq!(c.letters().get('a'), 2);
        assert_eq!(c.letters().get('b'), 2);
        assert_eq!(c.letters().total(), 4);
    }

    #[test]
    fn test_no_tally_with_explicit_alphabet() {
        let mut c = Classification::new(TargetRule::default(), false);
        c.extend(tokens("apple banana"));
        assert_eq!(c.letters().total(), 0);
        assert!(c.is_other("banana"));
    }

    #[test]
    fn test_stricter_rule_moves_words_to_other() {
        let mut c = Classification::new(TargetRule::SingleTrailingUnderscore, true);
        c.extend(tokens("keep__ swap_"));
        assert!(c.is_other("keep__"));
        assert!(c.target("swap_").is_some());
        assert!(c.target("keep__").is_none());
    }
}
