use crate::alphabet::Alphabet;
use crate::classify::{Classification, TargetKey};
use crate::id_gen::IdGenerator;
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use std::cmp::Reverse;

/// One Target word and the identifier it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub original: String,
    pub replacement: String,
    pub frequency: u64,
    pub first_seen: usize,
}

/// Immutable Target-to-replacement mapping produced by [`plan`].
///
/// Entries are kept in assignment order: most frequent word first.
#[derive(Debug, Clone, Default)]
pub struct ReplacementPlan {
    entries: Vec<Replacement>,
    index: HashMap<String, usize>,
    candidates_drawn: u64,
}

impl ReplacementPlan {
    /// Entries in assignment order.
    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    /// Replacement for a Target word, if it was planned.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.index
            .get(original)
            .map(|&i| self.entries[i].replacement.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of candidate identifiers generated, rejected ones included.
    pub fn candidates_drawn(&self) -> u64 {
        self.candidates_drawn
    }
}

fn is_free(candidate: &str, classification: &Classification, assigned: &HashSet<String>) -> bool {
    !candidate.starts_with(|c: char| c.is_ascii_digit())
        && !classification.is_other(candidate)
        && classification.target(candidate).is_none()
        && !assigned.contains(candidate)
}

/// Assigns every Target word a unique identifier.
///
/// Words are visited by descending frequency, ties broken by first
/// occurrence. All words draw from one counter, so frequent words get the
/// shortest free identifiers. A candidate is rejected if it starts with a
/// digit or equals an Other word, a reserved word, a Target word or an
/// earlier assignment.
pub fn plan(classification: &Classification, alphabet: &Alphabet) -> ReplacementPlan {
    let mut order: Vec<TargetKey> = classification.targets.keys().collect();
    order.sort_by_key(|&key| {
        let entry = &classification.targets[key];
        (Reverse(entry.frequency), entry.first_seen)
    });

    let mut gen = IdGenerator::new(alphabet);
    let mut assigned: HashSet<String> = HashSet::with_capacity(order.len());
    let mut entries = Vec::with_capacity(order.len());

    for key in order {
        let candidate = loop {
            let candidate = gen.get();
            if is_free(&candidate, classification, &assigned) {
                break candidate;
            }
        };

        assigned.insert(candidate.clone());
        let entry = &classification.targets[key];
        tracing::debug!(
            "{} -> {} ({} occurrences)",
            entry.original,
            candidate,
            entry.frequency
        );

        entries.push(Replacement {
            original: entry.original.clone(),
            replacement: candidate,
            frequency: entry.frequency,
            first_seen: entry.first_seen,
        });
    }

    let index = entries
        .iter()
        .enumerate()
        .map(|(i, r)| (r.original.clone(), i))
        .collect();

    ReplacementPlan {
        entries,
        index,
        candidates_drawn: gen.drawn(),
    }
}
