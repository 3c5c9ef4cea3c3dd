//! Shrinking anagram classes by dropping letters which commute with everything around them.

use crate::classify::ClassMap;
use crate::error::{Error, Result};
use crate::forest::DisjointForest;
use crate::registry::PairsRegistry;
use crate::word::{CountVector, LetterPair, Word};
use rayon::prelude::*;
use tracing::debug;

/// Drops every letter of `counts` which is registered as commuting with each of the other letters
/// present. Letters that aren't dropped keep their count.
///
/// ```
/// use commutators::{reduce_vector, LetterPair, PairsRegistry, Witness, Word};
///
/// let abc = Word::new("abc").unwrap().count_vector();
/// let mut registry = PairsRegistry::new();
/// registry.record(
///     LetterPair::new(b'a', b'b').unwrap(),
///     Witness::new(Word::new("abc").unwrap(), Word::new("bac").unwrap()),
/// );
/// // c has no registered pair with anything, so nothing can go.
/// assert_eq!(reduce_vector(&abc, &registry), abc);
/// ```
pub fn reduce_vector(counts: &CountVector, registry: &PairsRegistry) -> CountVector {
    let letters = counts.letters();
    letters.clone().fold(*counts, |reduced, letter| {
        let droppable = letters.clone().all(|other| match LetterPair::new(letter, other) {
            Some(pair) => registry.contains(pair),
            None => true,
        });
        if droppable {
            reduced.without(letter)
        } else {
            reduced
        }
    })
}

/// Keeps the letters of `word` which are still counted in `reduced`, in their original order.
pub fn reduce_word(word: &Word, reduced: &CountVector) -> Word {
    word.retain_counted(reduced)
}

/// Reduces every class whose count vector shrinks under `registry`.
///
/// Each such class is mapped onto the reduced words, and that quotient is merged into whichever
/// class already owns the reduced vector, or becomes that class. Every decision is made against
/// the classes as they were on entry: classes that will be reduced are taken out before any
/// quotient is merged anywhere, and a class that receives a merge is not reduced again until the
/// next call. Afterward, any class left with fewer than two words is discarded.
///
/// Returns the new class map and whether any class was reduced.
pub fn reduce_classes(
    mut classes: ClassMap,
    registry: &PairsRegistry,
) -> Result<(ClassMap, bool)> {
    let targets: Vec<(CountVector, CountVector)> = classes
        .keys()
        .filter_map(|counts| {
            let reduced = reduce_vector(counts, registry);
            if reduced != *counts {
                Some((*counts, reduced))
            } else {
                None
            }
        })
        .collect();

    let mut sources = Vec::with_capacity(targets.len());
    for (counts, reduced) in targets {
        let forest = classes.remove(&counts).ok_or_else(|| {
            Error::InvariantViolation(format!("class {:?} vanished before reduction", counts))
        })?;
        sources.push((counts, reduced, forest));
    }
    let changed = !sources.is_empty();

    let quotients: Vec<(CountVector, CountVector, DisjointForest<Word>)> = sources
        .into_par_iter()
        .map(|(counts, reduced, forest)| {
            let quotient = forest.map_keys(|word| reduce_word(word, &reduced));
            (counts, reduced, quotient)
        })
        .collect();

    for (counts, reduced, quotient) in quotients {
        debug!(
            from = ?counts,
            to = ?reduced,
            words = quotient.len(),
            "reducing class"
        );
        classes
            .entry(reduced)
            .or_insert_with(DisjointForest::new)
            .merge_from(&quotient);
    }

    classes.retain(|_, forest| forest.len() > 1);
    Ok((classes, changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::registry::Witness;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn registry_of(pairs: &[(u8, u8)]) -> PairsRegistry {
        let mut registry = PairsRegistry::new();
        for &(a, b) in pairs {
            let ab = Word::new(&format!("{}{}", a as char, b as char)).unwrap();
            let ba = Word::new(&format!("{}{}", b as char, a as char)).unwrap();
            registry.record(LetterPair::new(a, b).unwrap(), Witness::new(ab, ba));
        }
        registry
    }

    #[test]
    fn fully_commuting_vector_vanishes() {
        let abc = word("abc").count_vector();
        let registry = registry_of(&[(b'a', b'b'), (b'a', b'c'), (b'b', b'c')]);
        assert!(reduce_vector(&abc, &registry).is_zero());
    }

    #[test]
    fn partially_commuting_letter_is_dropped() {
        let aabc = word("aabc").count_vector();
        let registry = registry_of(&[(b'a', b'b'), (b'b', b'c')]);
        assert_eq!(reduce_vector(&aabc, &registry), word("aac").count_vector());
    }

    #[test]
    fn single_letter_vector_vanishes() {
        let aaa = word("aaa").count_vector();
        assert!(reduce_vector(&aaa, &PairsRegistry::new()).is_zero());
    }

    #[test]
    fn words_keep_surviving_letters_in_order() {
        let reduced = word("ca").count_vector();
        assert_eq!(reduce_word(&word("cbab"), &reduced), word("ca"));
    }

    #[test]
    fn reduction_merges_into_existing_class() {
        // "xacb" and "axbc" reduce to "acb" and "abc" once x commutes with everything; the class
        // for {a, b, c} already holds "abc" and "bca", so all of them end up related.
        let mut classes = classify(vec![word("xacb"), word("axbc"), word("abc"), word("bca")])
            .unwrap();
        let registry = registry_of(&[(b'a', b'x'), (b'b', b'x'), (b'c', b'x')]);

        let (reduced, changed) = reduce_classes(classes.clone(), &registry).unwrap();
        assert!(changed);
        assert_eq!(reduced.len(), 1);
        let forest = &reduced[&word("abc").count_vector()];
        assert_eq!(forest.len(), 3);
        assert!(forest.are_related(&word("acb"), &word("bca")).unwrap());

        classes.clear();
        let (empty, changed) = reduce_classes(classes, &registry).unwrap();
        assert!(!changed);
        assert!(empty.is_empty());
    }

    #[test]
    fn merge_keeps_unrelated_components_apart() {
        let mut target = DisjointForest::new();
        target.insert(word("ab"));
        target.insert(word("ba"));
        let mut classes = ClassMap::new();
        classes.insert(word("ab").count_vector(), target);
        let mut source = DisjointForest::new();
        source.union(word("abz"), word("zab"));
        source.insert(word("bza"));
        classes.insert(word("abz").count_vector(), source);

        let registry = registry_of(&[(b'a', b'z'), (b'b', b'z')]);
        let (reduced, _) = reduce_classes(classes, &registry).unwrap();
        let forest = &reduced[&word("ab").count_vector()];
        assert_eq!(forest.len(), 2);
        assert!(!forest.are_related(&word("ab"), &word("ba")).unwrap());
    }

    #[test]
    fn collapsed_class_is_removed() {
        let classes = classify(vec![word("ab"), word("ba")]).unwrap();
        let registry = registry_of(&[(b'a', b'b')]);
        let (reduced, changed) = reduce_classes(classes, &registry).unwrap();
        assert!(changed);
        assert!(reduced.is_empty());
    }
}
