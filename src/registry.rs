//! The append-only record of letter pairs known to commute, along with the evidence for each.

use crate::word::{LetterPair, Word};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;
use std::fmt;

/// Two related words which differ by swapping one pair of adjacent letters. The words are stored
/// in sorted order so the same evidence found from either side compares equal.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Witness(Word, Word);

impl Witness {
    /// Creates a witness from two words, in either order.
    pub fn new(a: Word, b: Word) -> Self {
        if a <= b {
            Witness(a, b)
        } else {
            Witness(b, a)
        }
    }

    /// The two words, in sorted order.
    pub fn words(&self) -> (&Word, &Word) {
        (&self.0, &self.1)
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.0, self.1)
    }
}

/// Every commuting letter pair discovered so far, with the witnesses found for it.
///
/// Entries are only ever added. Iteration is in lexicographic pair order.
#[derive(Clone, Default, PartialEq)]
pub struct PairsRegistry {
    pairs: BTreeMap<LetterPair, BTreeSet<Witness>>,
}

impl PairsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PairsRegistry::default()
    }

    /// The number of registered pairs. This never exceeds [`PAIR_COUNT`](crate::PAIR_COUNT).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns `true` if `pair` has been registered.
    pub fn contains(&self, pair: LetterPair) -> bool {
        self.pairs.contains_key(&pair)
    }

    /// The witnesses recorded for `pair`, if it has been registered.
    pub fn witnesses(&self, pair: LetterPair) -> Option<&BTreeSet<Witness>> {
        self.pairs.get(&pair)
    }

    /// Registered pairs in lexicographic order.
    pub fn pairs(&self) -> impl DoubleEndedIterator<Item = LetterPair> + Clone + '_ {
        self.pairs.keys().copied()
    }

    /// Registered pairs with their witnesses, in lexicographic pair order.
    pub fn iter(&self) -> btree_map::Iter<'_, LetterPair, BTreeSet<Witness>> {
        self.pairs.iter()
    }

    /// Adds `witness` as evidence for `pair`. Returns `true` if the pair was not registered
    /// before.
    pub fn record(&mut self, pair: LetterPair, witness: Witness) -> bool {
        let fresh = !self.pairs.contains_key(&pair);
        self.pairs.entry(pair).or_default().insert(witness);
        fresh
    }

    /// Adds every pair and witness from `other`. Returns `true` if any pair was new.
    pub fn absorb(&mut self, other: PairsRegistry) -> bool {
        let mut changed = false;
        for (pair, witnesses) in other.pairs {
            match self.pairs.entry(pair) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(witnesses);
                    changed = true;
                }
                btree_map::Entry::Occupied(mut entry) => entry.get_mut().extend(witnesses),
            }
        }
        changed
    }

    /// Returns `true` if every pair registered in `other` is also registered here.
    pub fn covers(&self, other: &PairsRegistry) -> bool {
        other.pairs.keys().all(|pair| self.pairs.contains_key(pair))
    }
}

impl fmt::Debug for PairsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u8, b: u8) -> LetterPair {
        LetterPair::new(a, b).unwrap()
    }

    fn witness(a: &str, b: &str) -> Witness {
        Witness::new(Word::new(a).unwrap(), Word::new(b).unwrap())
    }

    #[test]
    fn witnesses_are_unordered() {
        assert_eq!(witness("bac", "abc"), witness("abc", "bac"));
    }

    #[test]
    fn recording_reports_new_pairs_only() {
        let mut registry = PairsRegistry::new();
        assert!(registry.record(pair(b'a', b'b'), witness("ab", "ba")));
        assert!(!registry.record(pair(b'b', b'a'), witness("abc", "bac")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.witnesses(pair(b'a', b'b')).unwrap().len(), 2);
    }

    #[test]
    fn absorbing_only_grows() {
        let mut old = PairsRegistry::new();
        old.record(pair(b'a', b'b'), witness("ab", "ba"));
        let mut new = PairsRegistry::new();
        new.record(pair(b'c', b'd'), witness("cd", "dc"));
        new.record(pair(b'a', b'b'), witness("abx", "bax"));

        let before = old.clone();
        assert!(old.absorb(new));
        assert!(old.covers(&before));
        assert_eq!(old.len(), 2);
        assert!(!old.clone().absorb(PairsRegistry::new()));
    }
}
