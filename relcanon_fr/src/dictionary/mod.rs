mod text;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;

/// One reading of an inflected form: the dictionary POS tag and the lemma,
/// both lower-cased.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryEntry {
    pub pos: String,
    pub lemma: String,
}

impl DictionaryEntry {
    pub fn new<P, L>(pos: P, lemma: L) -> Self
    where
        P: Into<String>,
        L: Into<String>,
    {
        DictionaryEntry {
            pos: pos.into(),
            lemma: lemma.into(),
        }
    }
}

/// Storage format of a dictionary resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// ISO-8859-1 lines of the form `form<TAB>lemma <Tag,Extra,...>`.
    Text,
    /// Cache produced by [`LemmaDictionary::write_binary`].
    Binary,
}

impl Default for DictionaryFormat {
    fn default() -> Self {
        DictionaryFormat::Text
    }
}

/// Mapping from lower-cased inflected forms to their readings.
///
/// Readings keep the order in which they appear in the resource. The
/// dictionary is never mutated once loaded.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaDictionary {
    entries: FxHashMap<String, Vec<DictionaryEntry>>,
}

impl LemmaDictionary {
    /// Reads a dictionary in the given format.
    pub fn load<R>(reader: R, format: DictionaryFormat) -> Result<Self, DictionaryError>
    where
        R: Read,
    {
        let start = Instant::now();
        let dictionary = match format {
            DictionaryFormat::Text => text::read_text(BufReader::new(reader))?,
            DictionaryFormat::Binary => bincode::deserialize_from(BufReader::new(reader))?,
        };

        log::info!(
            "Loaded {} inflected forms ({:?} format) in {:?}",
            dictionary.len(),
            format,
            start.elapsed()
        );

        Ok(dictionary)
    }

    /// Opens and reads a dictionary file.
    pub fn from_path<P>(path: P, format: DictionaryFormat) -> Result<Self, DictionaryError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::load(file, format)
    }

    /// Writes the binary cache format, readable with `DictionaryFormat::Binary`.
    pub fn write_binary<W>(&self, writer: W) -> Result<(), DictionaryError>
    where
        W: Write,
    {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Readings of a lower-cased inflected form.
    pub fn get(&self, form: &str) -> Option<&[DictionaryEntry]> {
        self.entries.get(form).map(Vec::as_slice)
    }

    pub fn contains(&self, form: &str) -> bool {
        self.entries.contains_key(form)
    }

    /// Number of distinct inflected forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DictionaryEntry])> {
        self.entries
            .iter()
            .map(|(form, entries)| (form.as_str(), entries.as_slice()))
    }

    fn push(&mut self, form: String, entry: DictionaryEntry) {
        self.entries.entry(form).or_default().push(entry);
    }
}

impl<S> std::iter::FromIterator<(S, DictionaryEntry)> for LemmaDictionary
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, DictionaryEntry)>>(iter: I) -> Self {
        let mut dictionary = LemmaDictionary::default();
        for (form, entry) in iter {
            dictionary.push(form.into(), entry);
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::{DictionaryEntry, DictionaryFormat, LemmaDictionary};

    #[test]
    pub fn test_from_path() {
        let dictionary =
            LemmaDictionary::from_path("testdata/dictionary.txt", DictionaryFormat::Text).unwrap();

        assert_eq!(
            dictionary.get("mangeuse").unwrap(),
            &[
                DictionaryEntry::new("verb", "manger"),
                DictionaryEntry::new("nomc", "mangeur"),
            ]
        );
        assert_eq!(
            dictionary.get("été").unwrap(),
            &[
                DictionaryEntry::new("nomc", "été"),
                DictionaryEntry::new("verb", "être"),
            ]
        );
        assert_eq!(
            dictionary.get("a").unwrap(),
            &[DictionaryEntry::new("verb", "avoir")]
        );
        assert_eq!(
            dictionary.get("la").unwrap(),
            &[
                DictionaryEntry::new("dete", "le"),
                DictionaryEntry::new("pron", "le"),
                DictionaryEntry::new("nomc", "la"),
            ]
        );
        assert!(!dictionary.contains("b"));
        assert_eq!(dictionary.len(), 22);
    }

    #[test]
    pub fn test_binary_cache() {
        let dictionary =
            LemmaDictionary::from_path("testdata/dictionary.txt", DictionaryFormat::Text).unwrap();

        let cache = tempfile::NamedTempFile::new().unwrap();
        dictionary
            .write_binary(File::create(cache.path()).unwrap())
            .unwrap();

        let restored = LemmaDictionary::from_path(cache.path(), DictionaryFormat::Binary).unwrap();
        assert_eq!(dictionary, restored);
    }

    #[test]
    pub fn test_corrupt_binary_cache() {
        let data: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert!(LemmaDictionary::load(data, DictionaryFormat::Binary).is_err());
    }

    #[test]
    pub fn test_from_iter() {
        let dictionary: LemmaDictionary = vec![
            ("ont", DictionaryEntry::new("verb", "avoir")),
            ("ont", DictionaryEntry::new("verb", "avoir")),
        ]
        .into_iter()
        .collect();

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get("ont").unwrap().len(), 2);
    }
}
