//! Plain-text renderings of a run's results. None of these touch the filesystem; the caller
//! decides where the text goes.

use crate::classify::ClassMap;
use crate::registry::PairsRegistry;
use crate::word::{LetterPair, Word};
use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::SortedIterator;
use std::io::{self, Write};

/// Writes one line per registered pair, listing its witnesses:
///
/// ```text
/// (a, b): ab~ba, abc~bac
/// ```
pub fn write_status<W: Write>(out: &mut W, registry: &PairsRegistry) -> io::Result<()> {
    for (pair, witnesses) in registry.iter() {
        write!(out, "{}:", pair)?;
        for (i, witness) in witnesses.iter().enumerate() {
            let (a, b) = witness.words();
            let sep = if i == 0 { " " } else { ", " };
            write!(out, "{}{}~{}", sep, a, b)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Splits all 325 pairs into those found to commute and those that weren't, writing one pair per
/// line to `good` and `bad` respectively.
pub fn write_quality<G: Write, B: Write>(
    good: &mut G,
    bad: &mut B,
    registry: &PairsRegistry,
) -> io::Result<()> {
    let all = || LetterPair::all().assume_sorted_by_item();
    let found = || registry.pairs().assume_sorted_by_item();
    for pair in all().intersection(found()) {
        writeln!(good, "{}", pair)?;
    }
    for pair in all().difference(found()) {
        writeln!(bad, "{}", pair)?;
    }
    Ok(())
}

/// Writes one line per irreducible class: its count vector, then its words grouped by component.
///
/// ```text
/// {'a': 1, 'b': 1}: [ab] [ba]
/// ```
pub fn write_irreducibles<W: Write>(out: &mut W, classes: &ClassMap) -> io::Result<()> {
    for (counts, forest) in classes {
        write!(out, "{:?}:", counts)?;
        let mut components: Vec<Vec<&Word>> = forest.components();
        for component in components.iter_mut() {
            component.sort_unstable();
        }
        components.sort_unstable();
        for component in components {
            write!(out, " [")?;
            for (i, word) in component.into_iter().enumerate() {
                if i > 0 {
                    write!(out, " ")?;
                }
                write!(out, "{}", word)?;
            }
            write!(out, "]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the evidencing classes for one pair, one class's sorted words per line.
pub fn write_history<W: Write>(out: &mut W, evidence: &[Vec<Word>]) -> io::Result<()> {
    for words in evidence {
        let mut first = true;
        for word in words {
            if !first {
                write!(out, " ")?;
            }
            first = false;
            write!(out, "{}", word)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The file name a pair's history is written under, such as `history_ab.txt`.
pub fn history_file_name(pair: LetterPair) -> String {
    format!(
        "history_{}{}.txt",
        char::from(pair.first()),
        char::from(pair.second())
    )
}
