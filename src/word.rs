//! Words, their letter-count vectors, and pairs of letters.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::iter;
use std::str::FromStr;

/// Number of letters in the alphabet words are drawn from.
pub const ALPHABET_LEN: usize = 26;

/// Number of distinct letter pairs, `C(26, 2)`.
pub const PAIR_COUNT: usize = ALPHABET_LEN * (ALPHABET_LEN - 1) / 2;

/// Most dictionary words are short, so a word this long or shorter lives inline without a heap
/// allocation.
type WordBuf = SmallVec<[u8; 16]>;

/// An immutable sequence of lowercase ASCII letters.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word(WordBuf);

impl Word {
    /// Creates a word, checking that every character is a lowercase ASCII letter.
    ///
    /// ```
    /// use commutators::Word;
    ///
    /// assert_eq!(Word::new("cab").unwrap().to_string(), "cab");
    /// assert!(Word::new("Cab").is_err());
    /// assert!(Word::new("can't").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self> {
        if text.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Word(SmallVec::from_slice(text.as_bytes())))
        } else {
            Err(Error::InvalidWord(text.to_owned()))
        }
    }

    /// The number of letters in this word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty word, which is what a word reduces to once all of its letters
    /// commute.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The letters of this word, as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        // Construction only ever admits ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Counts how often each letter occurs in this word.
    pub fn count_vector(&self) -> CountVector {
        let mut counts = [0; ALPHABET_LEN];
        for &b in self.0.iter() {
            counts[letter_index(b)] += 1;
        }
        CountVector(counts)
    }

    /// Every word reachable by swapping two adjacent, distinct letters, paired with the letters
    /// that were swapped.
    ///
    /// ```
    /// use commutators::{LetterPair, Word};
    ///
    /// let word = Word::new("abb").unwrap();
    /// let siblings: Vec<_> = word
    ///     .admissible_siblings()
    ///     .map(|(w, p)| (w.to_string(), p))
    ///     .collect();
    /// assert_eq!(siblings, vec![("bab".to_string(), LetterPair::new(b'a', b'b').unwrap())]);
    /// ```
    pub fn admissible_siblings(&self) -> impl Iterator<Item = (Word, LetterPair)> + '_ {
        self.0.windows(2).enumerate().filter_map(move |(i, window)| {
            let pair = LetterPair::new(window[0], window[1])?;
            let mut sibling = self.clone();
            sibling.0.swap(i, i + 1);
            Some((sibling, pair))
        })
    }

    /// Keeps, in their original order, only the letters which are still counted in `counts`.
    ///
    /// ```
    /// use commutators::Word;
    ///
    /// let word = Word::new("banana").unwrap();
    /// let counts = Word::new("nn").unwrap().count_vector();
    /// assert_eq!(word.retain_counted(&counts).to_string(), "nn");
    /// ```
    pub fn retain_counted(&self, counts: &CountVector) -> Word {
        Word(
            self.0
                .iter()
                .copied()
                .filter(|&b| counts.0[letter_index(b)] > 0)
                .collect(),
        )
    }

    /// Keeps only the two letters of `pair`, which is the pattern the word shows when every other
    /// letter is ignored.
    pub fn project(&self, pair: LetterPair) -> Word {
        Word(
            self.0
                .iter()
                .copied()
                .filter(|&b| pair.contains(b))
                .collect(),
        )
    }
}

impl FromStr for Word {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Word::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

fn letter_index(b: u8) -> usize {
    usize::from(b - b'a')
}

fn index_letter(i: usize) -> u8 {
    b'a' + i as u8
}

/// How many times each letter `a` through `z` occurs. Two words are anagrams exactly when their
/// count vectors are equal.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CountVector([u32; ALPHABET_LEN]);

impl CountVector {
    /// How many times `letter` is counted. Bytes outside `a..=z` are never counted.
    pub fn count(&self, letter: u8) -> u32 {
        if letter.is_ascii_lowercase() {
            self.0[letter_index(letter)]
        } else {
            0
        }
    }

    /// The letters with a nonzero count, in alphabetical order.
    pub fn letters(&self) -> impl Iterator<Item = u8> + Clone + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, _)| index_letter(i))
    }

    /// Every pair of distinct letters which are both present, in lexicographic order.
    pub fn letter_pairs(&self) -> impl Iterator<Item = LetterPair> + '_ {
        let letters = self.letters();
        letters.clone().enumerate().flat_map(move |(i, a)| {
            letters
                .clone()
                .skip(i + 1)
                .filter_map(move |b| LetterPair::new(a, b))
        })
    }

    /// Returns a copy of this vector with `letter` no longer counted.
    pub fn without(mut self, letter: u8) -> Self {
        if letter.is_ascii_lowercase() {
            self.0[letter_index(letter)] = 0;
        }
        self
    }

    /// Returns `true` when no letter is counted at all.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }
}

impl<'a> From<&'a Word> for CountVector {
    fn from(word: &'a Word) -> Self {
        word.count_vector()
    }
}

impl fmt::Debug for CountVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.letters().map(|l| (char::from(l), self.count(l))))
            .finish()
    }
}

/// An unordered pair of distinct letters, stored in alphabetical order.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LetterPair(u8, u8);

impl LetterPair {
    /// Creates the pair of two lowercase letters, in either order. Returns `None` if the letters
    /// are the same or either one is not a lowercase ASCII letter.
    ///
    /// ```
    /// use commutators::LetterPair;
    ///
    /// assert_eq!(LetterPair::new(b'b', b'a'), LetterPair::new(b'a', b'b'));
    /// assert_eq!(LetterPair::new(b'a', b'a'), None);
    /// ```
    pub fn new(a: u8, b: u8) -> Option<Self> {
        if a == b || !a.is_ascii_lowercase() || !b.is_ascii_lowercase() {
            None
        } else if a < b {
            Some(LetterPair(a, b))
        } else {
            Some(LetterPair(b, a))
        }
    }

    /// All 325 letter pairs, in lexicographic order.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (b'a'..=b'z').flat_map(|a| (a + 1..=b'z').map(move |b| LetterPair(a, b)))
    }

    /// The alphabetically earlier letter.
    pub fn first(self) -> u8 {
        self.0
    }

    /// The alphabetically later letter.
    pub fn second(self) -> u8 {
        self.1
    }

    /// Returns `true` if `letter` is one of the two letters in this pair.
    pub fn contains(self, letter: u8) -> bool {
        letter == self.0 || letter == self.1
    }
}

impl fmt::Display for LetterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", char::from(self.0), char::from(self.1))
    }
}

impl fmt::Debug for LetterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl iter::FromIterator<u8> for CountVector {
    /// Counts the given letters, ignoring anything outside `a..=z`.
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut counts = [0; ALPHABET_LEN];
        for b in iter.into_iter().filter(u8::is_ascii_lowercase) {
            counts[letter_index(b)] += 1;
        }
        CountVector(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn anagrams_share_count_vectors() {
        assert_eq!(word("listen").count_vector(), word("silent").count_vector());
        assert_ne!(word("listen").count_vector(), word("listens").count_vector());
    }

    #[test]
    fn repeated_letters_have_no_sibling() {
        assert_eq!(word("aaa").admissible_siblings().count(), 0);
        assert_eq!(word("").admissible_siblings().count(), 0);
    }

    #[test]
    fn siblings_swap_each_distinct_neighbour() {
        let siblings: Vec<_> = word("abc")
            .admissible_siblings()
            .map(|(w, p)| (w.to_string(), p.to_string()))
            .collect();
        assert_eq!(
            siblings,
            vec![
                ("bac".to_string(), "(a, b)".to_string()),
                ("acb".to_string(), "(b, c)".to_string()),
            ]
        );
    }

    #[test]
    fn pairs_enumerate_in_order() {
        let all: Vec<_> = LetterPair::all().collect();
        assert_eq!(all.len(), PAIR_COUNT);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all[0].to_string(), "(a, b)");
        assert_eq!(all[PAIR_COUNT - 1].to_string(), "(y, z)");
    }

    #[test]
    fn count_vector_pairs_cover_present_letters() {
        let pairs: Vec<_> = word("cabbage")
            .count_vector()
            .letter_pairs()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[..4], ["(a, b)", "(a, c)", "(a, e)", "(a, g)"]);
        assert_eq!(pairs[9], "(e, g)");
    }

    #[test]
    fn projection_keeps_pattern() {
        let pair = LetterPair::new(b'a', b'n').unwrap();
        assert_eq!(word("banana").project(pair).to_string(), "anana");
    }

    #[test]
    fn collected_counts_ignore_foreign_bytes() {
        let counts: CountVector = b"a-b a".iter().copied().collect();
        assert_eq!(counts, word("aab").count_vector());
        assert!(counts.without(b'a').without(b'b').is_zero());
    }
}
