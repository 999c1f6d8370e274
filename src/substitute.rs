use crate::files::FileBuffer;
use crate::planner::{Replacement, ReplacementPlan};
use std::cmp::Reverse;

/// Letters, digits and `_` are word characters. `$` is not, even though it
/// may appear inside a replaced word.
#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte offsets of every whole-word occurrence of `term` in `text`.
///
/// A match must not be preceded or followed by a word character. Overlapping
/// candidates are all examined, only accepted matches are returned, and
/// accepted matches never overlap.
pub fn find_whole_words(text: &str, term: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let Some(first) = term.chars().next() else {
        return matches;
    };

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let abs = start + pos;
        let end = abs + term.len();

        let left_ok = abs == 0 || !is_word_byte(bytes[abs - 1]);
        let right_ok = end >= bytes.len() || !is_word_byte(bytes[end]);

        if left_ok && right_ok {
            matches.push(abs);
            start = end;
        } else {
            start = abs + first.len_utf8();
        }
    }

    matches
}

/// Replaces every whole-word occurrence of `term`. Returns the number of
/// replacements; `text` is untouched when there are none.
pub fn replace_whole_words(text: &mut String, term: &str, replacement: &str) -> usize {
    let matches = find_whole_words(text, term);
    if matches.is_empty() {
        return 0;
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for &abs in &matches {
        out.push_str(&text[last..abs]);
        out.push_str(replacement);
        last = abs + term.len();
    }
    out.push_str(&text[last..]);
    *text = out;

    matches.len()
}

/// Replacement counts from one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Replacements per file, in the order the files were given.
    pub per_file: Vec<usize>,
}

impl SubstitutionReport {
    /// Replacements across all files.
    pub fn total(&self) -> usize {
        self.per_file.iter().sum()
    }

    /// Files with at least one replacement.
    pub fn files_changed(&self) -> usize {
        self.per_file.iter().filter(|&&n| n > 0).count()
    }
}

/// Plan entries in application order: longest original first, then by
/// first occurrence.
pub fn application_order(plan: &ReplacementPlan) -> Vec<&Replacement> {
    let mut order: Vec<&Replacement> = plan.entries().iter().collect();
    order.sort_by_key(|r| (Reverse(r.original.len()), r.first_seen));
    order
}

/// Rewrites every buffer according to `plan`.
///
/// Longer originals are replaced before shorter ones so that a word is never
/// rewritten through a shorter word it contains.
pub fn substitute(plan: &ReplacementPlan, files: &mut [FileBuffer]) -> SubstitutionReport {
    let mut per_file = vec![0; files.len()];

    for entry in application_order(plan) {
        for (file, count) in files.iter_mut().zip(per_file.iter_mut()) {
            *count += replace_whole_words(&mut file.content, &entry.original, &entry.replacement);
        }
    }

    SubstitutionReport { per_file }
}
