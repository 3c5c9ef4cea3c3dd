#![warn(missing_docs)]
#![doc(test(no_crate_inject))]
#![doc(test(attr(deny(unused, future_incompatible))))]

//! This crate discovers which pairs of letters can be swapped inside the words of a dictionary
//! without leaving a class of words already known to be equivalent.
//!
//! It starts from the anagram classes of the dictionary, where every word in a class is assumed
//! equivalent to every other. Then it alternates two steps until neither makes progress:
//!
//! 1. **Detection**: if a word and the word obtained by swapping two adjacent, distinct letters
//!    are both in a class and already related there, that pair of letters commutes. The two words
//!    are kept as the pair's witness.
//! 2. **Reduction**: a letter which commutes with every other letter present in a class adds no
//!    further structure to discover, so it is erased from the class's count vector and from each
//!    of its words. The reduced words keep every relation they had, and classes which reduce to
//!    the same count vector are merged.
//!
//! The final result is the set of commuting pairs, and the irreducible classes that remain.
//!
//! ```
//! use commutators::{FixedPointDriver, LetterPair, Word};
//!
//! let words = ["ab", "ba", "abc", "bac"].iter().map(|w| Word::new(w).unwrap());
//! let result = FixedPointDriver::new(words).unwrap().run().unwrap();
//! assert!(result.registry.contains(LetterPair::new(b'a', b'b').unwrap()));
//! // "abc" and "bac" stay behind: nothing shows that c commutes with anything.
//! assert_eq!(result.classes.len(), 1);
//! ```
//!
//! Equivalence classes are tracked with [`DisjointForest`], a union-find structure which can also
//! merge in another forest and take the quotient of itself under a function on its keys.

mod classify;
mod detect;
pub mod dictionary;
mod driver;
mod error;
mod forest;
mod history;
mod reduce;
mod registry;
pub mod report;
mod word;

pub use classify::{classify, ClassMap};
pub use detect::detect;
pub use driver::{Convergence, FixedPointDriver, Phase, RoundSummary};
pub use error::{Error, Result};
pub use forest::DisjointForest;
pub use history::{history, history_evidence, is_useful_history};
pub use reduce::{reduce_classes, reduce_vector, reduce_word};
pub use registry::{PairsRegistry, Witness};
pub use word::{CountVector, LetterPair, Word, ALPHABET_LEN, PAIR_COUNT};
