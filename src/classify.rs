//! Grouping a word list into anagram classes.

use crate::error::{Error, Result};
use crate::forest::DisjointForest;
use crate::word::{CountVector, Word};
use std::collections::{BTreeMap, HashSet};

/// Every live anagram class, keyed by the count vector its words share.
pub type ClassMap = BTreeMap<CountVector, DisjointForest<Word>>;

/// Groups `words` by count vector, keeping only vectors shared by at least two distinct words.
/// All the words in a class start out related to each other.
///
/// Repeated words count once. An empty word list is an error; a list without any anagrams just
/// produces no classes.
///
/// ```
/// use commutators::{classify, Word};
///
/// let words = ["abc", "bca", "dog"].iter().map(|w| Word::new(w).unwrap());
/// let classes = classify(words).unwrap();
/// assert_eq!(classes.len(), 1);
/// ```
pub fn classify<I>(words: I) -> Result<ClassMap>
where
    I: IntoIterator<Item = Word>,
{
    let mut seen = HashSet::new();
    let mut groups: BTreeMap<CountVector, Vec<Word>> = BTreeMap::new();
    let mut any = false;
    for word in words {
        any = true;
        if seen.insert(word.clone()) {
            groups.entry(word.count_vector()).or_default().push(word);
        }
    }
    if !any {
        return Err(Error::EmptyInput("classify"));
    }

    let mut classes = ClassMap::new();
    for (counts, group) in groups {
        if group.len() < 2 {
            continue;
        }
        let mut forest = DisjointForest::with_capacity(group.len());
        forest.union_all(group)?;
        classes.insert(counts, forest);
    }
    Ok(classes)
}
