use std::io::BufRead;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DictionaryEntry, LemmaDictionary};
use crate::error::DictionaryError;

/// `form<TAB>lemma <Pos[,Extra][,...]>`
///
/// The form runs up to the last tab. Only the lemma and the first tag field
/// are used.
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)\t(.*) *<([^,]+)(,([^,]+))?.*>$").expect("invalid dictionary line pattern")
});

/// POS tag of single letter entries (a, b, c, ...).
const LETTER_POS: &str = "ltre";

/// Reads the ISO-8859-1 text format.
pub(super) fn read_text<R>(mut reader: R) -> Result<LemmaDictionary, DictionaryError>
where
    R: BufRead,
{
    let mut dictionary = LemmaDictionary::default();
    let mut buf = Vec::new();
    let mut line_number = 0;
    let mut letters = 0;
    // blank lines are only an error when an entry follows them
    let mut blank = None;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = decode_latin1(trim_line_end(&buf));
        if line.trim().is_empty() {
            blank.get_or_insert((line_number, line));
            continue;
        }
        if let Some((line_number, line)) = blank.take() {
            return Err(DictionaryError::InvalidLine { line_number, line });
        }

        match parse_line(&line) {
            Some((form, entry)) => {
                if entry.pos == LETTER_POS {
                    letters += 1;
                } else {
                    dictionary.push(form, entry);
                }
            }
            None => return Err(DictionaryError::InvalidLine { line_number, line }),
        }
    }

    log::debug!("Skipped {} letter entries", letters);

    Ok(dictionary)
}

/// Splits a line into its inflected form and reading, `None` if the line is
/// malformed.
fn parse_line(line: &str) -> Option<(String, DictionaryEntry)> {
    let captures = LINE_PATTERN.captures(line)?;

    let form = captures[1].trim().to_lowercase();
    let mut lemma = captures[2].trim().to_lowercase();
    let pos = captures[3].trim().to_lowercase();

    if lemma == "le/la" {
        lemma = "le".to_owned();
    }

    Some((form, DictionaryEntry { pos, lemma }))
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// ISO-8859-1 code points coincide with the byte values.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
