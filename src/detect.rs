//! Finding letter pairs which commute within the current anagram classes.

use crate::classify::ClassMap;
use crate::error::Result;
use crate::forest::DisjointForest;
use crate::registry::{PairsRegistry, Witness};
use crate::word::Word;
use rayon::prelude::*;
use tracing::debug;

/// Scans every class for words whose admissible siblings are present and related to them, and
/// records each such letter pair that `registry` doesn't already know about.
///
/// Returns the extended registry and whether any new pair was found. Pairs already registered are
/// not re-scanned, so witnesses are only gathered in the round a pair is discovered.
///
/// Classes are scanned in parallel. Each class yields its own partial registry against the
/// unchanged input, and the partial results are merged afterward, so the outcome doesn't depend
/// on scheduling.
pub fn detect(classes: &ClassMap, mut registry: PairsRegistry) -> Result<(PairsRegistry, bool)> {
    let found = classes
        .par_iter()
        .map(|(_, forest)| scan_class(forest, &registry))
        .collect::<Result<Vec<_>>>()?;

    let mut changed = false;
    for partial in found {
        changed |= registry.absorb(partial);
    }
    debug!(pairs = registry.len(), changed, "detection pass finished");
    Ok((registry, changed))
}

fn scan_class(forest: &DisjointForest<Word>, known: &PairsRegistry) -> Result<PairsRegistry> {
    let mut found = PairsRegistry::new();
    for word in forest.keys() {
        for (sibling, pair) in word.admissible_siblings() {
            if known.contains(pair) || !forest.contains(&sibling) {
                continue;
            }
            if forest.are_related(word, &sibling)? {
                found.record(pair, Witness::new(word.clone(), sibling));
            }
        }
    }
    Ok(found)
}
