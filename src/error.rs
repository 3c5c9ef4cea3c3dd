//! Errors produced while discovering commutators.

/// Everything that can abort a run.
///
/// The first three variants are programmer errors: a caller asked the core for something its
/// invariants rule out. They are never recovered from, because doing so would leave the pair
/// registry or the class partition in an unknown state.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A forest was queried for a key it has never seen.
    #[error("key not found in forest: {0}")]
    KeyNotFound(String),

    /// An operation that needs at least one input was given none.
    #[error("empty input to {0}")]
    EmptyInput(&'static str),

    /// Internal bookkeeping disagreed with itself.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A word contained something other than lowercase ASCII letters.
    #[error("not a lowercase alphabetic word: {0:?}")]
    InvalidWord(String),

    /// The dictionary input could not be parsed.
    #[error("dictionary line {line}: {message}")]
    Dictionary {
        /// Line number reported by the tab-separated reader.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// Reading a dictionary or writing a report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
