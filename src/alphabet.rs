use crate::error::ConfigError;
use crate::tokenizer::is_token_char;
use std::cmp::Reverse;
use std::fmt;

/// Default share of observed letter frequency a derived alphabet must cover.
pub const DEFAULT_COVERAGE_PERCENT: u8 = 80;

const LETTERS: usize = 52;

/// Occurrence counts of ASCII letters in the Other words of a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterFrequency {
    counts: [u64; LETTERS],
}

impl Default for LetterFrequency {
    fn default() -> Self {
        Self {
            counts: [0; LETTERS],
        }
    }
}

#[inline]
fn letter_slot(c: char) -> Option<usize> {
    match c {
        'A'..='Z' => Some(c as usize - 'A' as usize),
        'a'..='z' => Some(26 + c as usize - 'a' as usize),
        _ => None,
    }
}

#[inline]
fn slot_letter(slot: usize) -> char {
    if slot < 26 {
        (b'A' + slot as u8) as char
    } else {
        (b'a' + (slot - 26) as u8) as char
    }
}

impl LetterFrequency {
    /// Tallies every letter of `word`; digits, `_` and `$` are ignored.
    pub fn record_word(&mut self, word: &str) {
        for slot in word.chars().filter_map(letter_slot) {
            self.counts[slot] += 1;
        }
    }

    /// Count for a single letter (0 for non-letters).
    pub fn get(&self, c: char) -> u64 {
        letter_slot(c).map_or(0, |slot| self.counts[slot])
    }

    /// Sum of all letter counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Letters that occurred at least once, most frequent first.
    ///
    /// Ties are ordered by ascending character code.
    pub fn ranked(&self) -> Vec<(char, u64)> {
        let mut ranked: Vec<(char, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(slot, &count)| (slot_letter(slot), count))
            .collect();
        ranked.sort_by_key(|&(c, count)| (Reverse(count), c));
        ranked
    }
}

fn strip_digits(group: &[char]) -> Vec<char> {
    group.iter().copied().filter(|c| !c.is_ascii_digit()).collect()
}

/// Per-position character sets used to manufacture identifiers.
///
/// `positions[0]` supplies the leading character only. Later characters
/// cycle through `positions[1..]`, wrapping back to index 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    positions: Vec<Vec<char>>,
}

impl Alphabet {
    /// Builds an alphabet from user-supplied character groups.
    ///
    /// The first group leads. It is also appended, without digits, after the
    /// remaining groups so that it recurs once they are exhausted.
    pub fn explicit<S: AsRef<str>>(groups: &[S]) -> Result<Self, ConfigError> {
        let parsed: Vec<Vec<char>> = groups
            .iter()
            .map(|g| g.as_ref().chars().collect())
            .collect();
        let first = parsed.first().ok_or(ConfigError::NoGroups)?;

        for (group, chars) in parsed.iter().enumerate() {
            if let Some(&ch) = chars.iter().find(|&&c| !is_token_char(c)) {
                return Err(ConfigError::InvalidCharacter { ch, group });
            }
            if chars.contains(&'_') {
                tracing::warn!(
                    "alphabet group {} contains '_'; generated names may end in an underscore",
                    group
                );
            }
        }

        let mut positions = Vec::with_capacity(parsed.len() + 1);
        positions.push(first.clone());
        positions.extend(parsed.iter().skip(1).cloned());
        positions.push(strip_digits(first));

        Self::validated(positions)
    }

    /// Derives an alphabet from the letter frequencies of the corpus.
    ///
    /// Letters are taken most frequent first until their cumulative count
    /// reaches `coverage_percent` of the total (integer-truncated).
    pub fn derived(letters: &LetterFrequency, coverage_percent: u8) -> Result<Self, ConfigError> {
        if coverage_percent == 0 || coverage_percent > 100 {
            return Err(ConfigError::Coverage(coverage_percent));
        }

        let threshold = letters.total() * u64::from(coverage_percent) / 100;
        let mut best = Vec::new();
        let mut cumulative = 0u64;
        for (c, count) in letters.ranked() {
            best.push(c);
            cumulative += count;
            if cumulative >= threshold {
                break;
            }
        }

        if best.is_empty() {
            return Err(ConfigError::EmptyDerivedAlphabet);
        }

        Self::validated(vec![strip_digits(&best), best])
    }

    fn validated(positions: Vec<Vec<char>>) -> Result<Self, ConfigError> {
        if let Some(position) = positions.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyGroup { position });
        }
        Ok(Self { positions })
    }

    /// Number of position sets, the leading set included. Always at least 2.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; an alphabet cannot be built without characters.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Character set for a position index (not wrapped).
    pub fn position(&self, index: usize) -> &[char] {
        &self.positions[index]
    }

    /// All position sets in order.
    pub fn positions(&self) -> &[Vec<char>] {
        &self.positions
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            for c in set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
