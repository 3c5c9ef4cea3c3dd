//! Which classes could, in principle, reveal that a given pair of letters commutes.
//!
//! If every word in a class shows the same pattern once all letters other than `a` and `b` are
//! erased, no swap of `a` and `b` can ever relate two of them, so that class is no evidence
//! either way. These queries are read-only and are meant to be run on the classes as first
//! classified, before any reduction.

use crate::classify::ClassMap;
use crate::word::{LetterPair, Word};
use std::collections::{BTreeMap, HashSet};

/// Returns `true` if the words show more than one pattern of the letters in `pair`.
///
/// ```
/// use commutators::{is_useful_history, LetterPair, Word};
///
/// let words: Vec<Word> = ["stop", "post", "tops"].iter().map(|w| w.parse().unwrap()).collect();
/// assert!(is_useful_history(&words, LetterPair::new(b's', b't').unwrap()));
/// assert!(!is_useful_history(&words[..1], LetterPair::new(b's', b't').unwrap()));
/// ```
pub fn is_useful_history<'a, I>(words: I, pair: LetterPair) -> bool
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut words = words.into_iter();
    let first = match words.next() {
        Some(word) => word.project(pair),
        None => return false,
    };
    words.any(|word| word.project(pair) != first)
}

/// The classes, each as a sorted word list, whose words show more than one pattern for `pair`.
pub fn history_evidence(classes: &ClassMap, pair: LetterPair) -> Vec<Vec<Word>> {
    classes
        .iter()
        .filter(|(counts, _)| counts.count(pair.first()) > 0 && counts.count(pair.second()) > 0)
        .map(|(_, forest)| sorted_words(forest.keys()))
        .filter(|words| is_useful_history(words, pair))
        .collect()
}

/// [`history_evidence`] for every pair at once. Pairs with no evidence are left out.
pub fn history(classes: &ClassMap) -> BTreeMap<LetterPair, Vec<Vec<Word>>> {
    let mut evidence: BTreeMap<LetterPair, Vec<Vec<Word>>> = BTreeMap::new();
    for (counts, forest) in classes {
        let words = sorted_words(forest.keys());
        for pair in counts.letter_pairs() {
            let patterns: HashSet<Word> = words.iter().map(|w| w.project(pair)).collect();
            if patterns.len() > 1 {
                evidence.entry(pair).or_default().push(words.clone());
            }
        }
    }
    evidence
}

fn sorted_words<'a>(words: impl Iterator<Item = &'a Word>) -> Vec<Word> {
    let mut words: Vec<Word> = words.cloned().collect();
    words.sort_unstable();
    words
}
