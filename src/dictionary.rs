//! Loading and cleaning a word list.

use crate::error::{Error, Result};
use crate::word::Word;
use csv_core::{ReadFieldResult, ReaderBuilder};
use std::io;
use std::str;
use tracing::debug;

/// Reads a dictionary, one entry per line, and returns its cleaned words in order.
///
/// Lines may carry extra tab-separated fields, such as a frequency count; only the first field is
/// used. See [`clean`] for which entries are kept.
pub fn load<R: io::Read>(mut input: R) -> Result<Vec<Word>> {
    let mut inputbuf = [0; 16384];
    let mut fieldbuf = [0; 1024];
    let mut fieldlen = 0;
    let mut field_index = 0;
    let mut words = Vec::new();
    let mut skipped = 0usize;
    let mut tsv = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .build();

    loop {
        let read = input.read(&mut inputbuf)?;
        let mut bytes = &inputbuf[..read];
        loop {
            let (result, nin, nout) = tsv.read_field(bytes, &mut fieldbuf[fieldlen..]);
            bytes = &bytes[nin..];
            fieldlen += nout;
            match result {
                ReadFieldResult::InputEmpty => break,
                ReadFieldResult::OutputFull => {
                    return Err(Error::Dictionary {
                        line: tsv.line(),
                        message: "entry too long".to_owned(),
                    });
                }
                ReadFieldResult::Field { record_end } => {
                    if field_index == 0 {
                        match str::from_utf8(&fieldbuf[..fieldlen]).ok().and_then(clean) {
                            Some(word) => words.push(word),
                            None => skipped += 1,
                        }
                    }
                    fieldlen = 0;
                    field_index = if record_end { 0 } else { field_index + 1 };
                }
                ReadFieldResult::End => {
                    debug!(words = words.len(), skipped, "loaded dictionary");
                    return Ok(words);
                }
            }
        }
    }
}

/// Trims and lowercases a raw dictionary entry, keeping it only if what remains is made entirely
/// of the letters `a` through `z`.
///
/// ```
/// use commutators::dictionary::clean;
///
/// assert_eq!(clean("  Stop\r").unwrap().to_string(), "stop");
/// assert!(clean("don't").is_none());
/// assert!(clean("café").is_none());
/// assert!(clean("").is_none());
/// ```
pub fn clean(raw: &str) -> Option<Word> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Word::new(&trimmed.to_ascii_lowercase()).ok()
}
