use crate::alphabet::Alphabet;

/// Returns the `n`-th candidate identifier under `alphabet`.
///
/// Bijective mixed-radix numeration: every `n` maps to a distinct string, and
/// lengths never decrease as `n` grows. Position 0 supplies the first
/// character; later characters cycle through positions `1..`, never
/// revisiting position 0.
pub fn identifier_at(mut n: u64, alphabet: &Alphabet) -> String {
    let mut result = String::new();
    let mut position = 0;

    loop {
        let set = alphabet.position(position);
        let base = set.len() as u64;
        result.push(set[(n % base) as usize]);
        n /= base;

        if n == 0 {
            return result;
        }

        n -= 1;
        position += 1;
        if position == alphabet.len() {
            position = 1;
        }
    }
}

/// Candidate generator with one shared counter.
///
/// The counter is never reset, so every candidate is produced at most once
/// per run no matter how many words draw from it.
#[derive(Debug)]
pub(crate) struct IdGenerator<'a> {
    alphabet: &'a Alphabet,
    next: u64,
}

impl<'a> IdGenerator<'a> {
    /// Creates a generator starting from counter 0.
    pub(crate) fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet, next: 0 }
    }

    /// Returns the next candidate and advances the counter.
    pub(crate) fn get(&mut self) -> String {
        let id = identifier_at(self.next, self.alphabet);
        self.next += 1;
        id
    }

    /// Number of candidates produced so far.
    pub(crate) fn drawn(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_n(alphabet: &Alphabet, n: u64) -> Vec<String> {
        (0..n).map(|i| identifier_at(i, alphabet)).collect()
    }

    #[test]
    fn test_two_symbol_sequence() {
        let alphabet = Alphabet::explicit(&["ab"]).unwrap();
        assert_eq!(
            first_n(&alphabet, 8),
            vec!["a", "b", "aa", "ba", "ab", "bb", "aaa", "baa"]
        );
    }

    #[test]
    fn test_position_varying_sets() {
        // Leading set {x, y}, then {0, 1}; the recurring set is {x, y}.
        let alphabet = Alphabet::explicit(&["xy", "01"]).unwrap();
        let ids = first_n(&alphabet, 6);
        assert_eq!(ids, vec!["x", "y", "x0", "y0", "x1", "y1"]);
        // Third character comes from the recurring set, not the digits.
        assert_eq!(identifier_at(6, &alphabet), "x0x");
    }

    #[test]
    fn test_wraps_to_position_one() {
        // positions: [a] [b] [a]; lengths grow one per step.
        let alphabet = Alphabet::explicit(&["a", "b"]).unwrap();
        assert_eq!(first_n(&alphabet, 5), vec!["a", "ab", "aba", "abab", "ababa"]);
    }

    #[test]
    fn test_lengths_non_decreasing() {
        let alphabet = Alphabet::explicit(&["abc", "de"]).unwrap();
        let ids = first_n(&alphabet, 500);
        assert!(ids.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    #[test]
    fn test_distinct() {
        let alphabet = Alphabet::explicit(&["abc", "de"]).unwrap();
        let ids = first_n(&alphabet, 500);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_generator_shares_counter() {
        let alphabet = Alphabet::explicit(&["ab"]).unwrap();
        let mut gen = IdGenerator::new(&alphabet);
        assert_eq!(gen.get(), "a");
        assert_eq!(gen.get(), "b");
        assert_eq!(gen.get(), "aa");
        assert_eq!(gen.drawn(), 3);
    }
}
