use std::sync::Arc;

use crate::dictionary::{DictionaryEntry, LemmaDictionary};
use crate::error::LemmaError;
use crate::lemma::{LemmaFeatures, Lemmatize, PosCompatibilityMap};

/// Dictionary lemmatizer. Ambiguous forms are resolved with the tag proposed
/// by the POS tagger.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    dictionary: Arc<LemmaDictionary>,
    pos_map: PosCompatibilityMap,
}

impl Lemmatizer {
    /// Constructs a new Lemmatizer.
    pub fn new(dictionary: Arc<LemmaDictionary>, pos_map: PosCompatibilityMap) -> Self {
        Lemmatizer {
            dictionary,
            pos_map,
        }
    }

    pub fn dictionary(&self) -> &LemmaDictionary {
        &self.dictionary
    }

    pub fn pos_map(&self) -> &PosCompatibilityMap {
        &self.pos_map
    }

    /// Finds the lemma of `token` tagged `pos` by the external tagger.
    ///
    /// Forms missing from the dictionary are their own lemma. The result is
    /// always lower-cased. Fails only when disambiguation meets a dictionary
    /// tag that the compatibility map does not know.
    pub fn resolve(&self, token: &str, pos: &str) -> Result<String, LemmaError> {
        // "suis" is also a form of "suivre"
        if token == "suis" {
            return Ok("être".to_owned());
        }

        let key = token.trim().to_lowercase();
        let lemma = match self.dictionary.get(&key) {
            None | Some([]) => token,
            Some([entry]) => entry.lemma.as_str(),
            Some(entries) => self.disambiguate(&key, entries, pos)?,
        };

        Ok(lemma.to_lowercase())
    }

    /// Element-wise [`Lemmatizer::resolve`].
    pub fn resolve_all<S>(&self, tokens: &[S], pos_tags: &[S]) -> Result<Vec<String>, LemmaError>
    where
        S: AsRef<str>,
    {
        if tokens.len() != pos_tags.len() {
            return Err(LemmaError::InvalidArgument(format!(
                "{} tokens but {} POS tags",
                tokens.len(),
                pos_tags.len()
            )));
        }

        tokens
            .iter()
            .zip(pos_tags)
            .map(|(token, pos)| self.resolve(token.as_ref(), pos.as_ref()))
            .collect()
    }

    fn disambiguate<'a>(
        &self,
        key: &str,
        entries: &'a [DictionaryEntry],
        pos: &str,
    ) -> Result<&'a str, LemmaError> {
        let first = &entries[0];

        let first_lemma = first.lemma.to_lowercase();
        if entries
            .iter()
            .all(|entry| entry.lemma.to_lowercase() == first_lemma)
        {
            return Ok(&first.lemma);
        }

        for entry in entries {
            if self.pos_map.is_compatible(&entry.pos, pos)? {
                return Ok(&entry.lemma);
            }
        }

        log::debug!(
            "No reading of '{}' compatible with {}, using '{}'",
            key,
            pos,
            first.lemma
        );

        Ok(&first.lemma)
    }
}

impl Lemmatize for Lemmatizer {
    fn lemmatize_batch<T>(&self, tokens: &[T]) -> Result<Vec<String>, LemmaError>
    where
        T: LemmaFeatures,
    {
        tokens
            .iter()
            .map(|token| {
                let pos = token.pos().ok_or_else(|| {
                    LemmaError::InvalidArgument(format!("'{}' has no POS tag", token.form()))
                })?;
                self.resolve(token.form(), pos)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use conllx::TokenBuilder;

    use super::Lemmatizer;
    use crate::dictionary::{DictionaryEntry, DictionaryFormat, LemmaDictionary};
    use crate::error::LemmaError;
    use crate::lemma::{Lemmatize, PosCompatibilityMap, TaggedToken};

    fn test_lemmatizer() -> Lemmatizer {
        let dictionary =
            LemmaDictionary::from_path("testdata/dictionary.txt", DictionaryFormat::Text).unwrap();
        Lemmatizer::new(Arc::new(dictionary), PosCompatibilityMap::default())
    }

    #[test]
    pub fn test_disambiguation() {
        let lemmatizer = test_lemmatizer();
        assert_eq!(lemmatizer.resolve("mangeuse", "V").unwrap(), "manger");
        assert_eq!(lemmatizer.resolve("mangeuse", "NC").unwrap(), "mangeur");
        assert_eq!(lemmatizer.resolve("été", "VPP").unwrap(), "être");
        assert_eq!(lemmatizer.resolve("été", "NC").unwrap(), "été");
        assert_eq!(lemmatizer.resolve("la", "DET").unwrap(), "le");
        assert_eq!(lemmatizer.resolve("la", "NC").unwrap(), "la");
    }

    #[test]
    pub fn test_no_compatible_reading() {
        let lemmatizer = test_lemmatizer();
        // falls back to the first reading
        assert_eq!(lemmatizer.resolve("mangeuse", "ADJ").unwrap(), "manger");
        assert_eq!(lemmatizer.resolve("vue", "P").unwrap(), "voir");
    }

    #[test]
    pub fn test_unambiguous() {
        let lemmatizer = test_lemmatizer();
        assert_eq!(lemmatizer.resolve("ont", "NC").unwrap(), "avoir");
        assert_eq!(lemmatizer.resolve(" Obtenu ", "VPP").unwrap(), "obtenir");
        // same lemma twice, no tag lookup needed
        let dictionary: LemmaDictionary = vec![
            ("mangeais", DictionaryEntry::new("verb", "manger")),
            ("mangeais", DictionaryEntry::new("xyz", "Manger")),
        ]
        .into_iter()
        .collect();
        let lemmatizer = Lemmatizer::new(Arc::new(dictionary), PosCompatibilityMap::default());
        assert_eq!(lemmatizer.resolve("mangeais", "NC").unwrap(), "manger");
    }

    #[test]
    pub fn test_unknown_form() {
        let lemmatizer = test_lemmatizer();
        assert_eq!(lemmatizer.resolve("Montréal", "NPP").unwrap(), "montréal");
        assert_eq!(lemmatizer.resolve("d'", "P").unwrap(), "d'");
    }

    #[test]
    pub fn test_suis() {
        let lemmatizer = test_lemmatizer();
        for pos in &["V", "NC", "VPP", ""] {
            assert_eq!(lemmatizer.resolve("suis", pos).unwrap(), "être");
        }
    }

    #[test]
    pub fn test_unmapped_dictionary_pos() {
        let lemmatizer = test_lemmatizer();
        assert_eq!(
            lemmatizer.resolve("Paris", "NPP"),
            Err(LemmaError::UnmappedPos("nomp".to_owned()))
        );
    }

    #[test]
    pub fn test_resolve_all() {
        let lemmatizer = test_lemmatizer();
        let tokens = ["Il", "a", "mangé", "du", "pain"];
        let pos = ["CLS", "V", "VPP", "P+D", "NC"];
        assert_eq!(
            lemmatizer.resolve_all(&tokens, &pos).unwrap(),
            vec!["il", "avoir", "manger", "du", "pain"]
        );
        assert!(lemmatizer.resolve_all(&tokens, &pos[..2]).is_err());
    }

    #[test]
    pub fn test_lemmatize_batch() {
        let lemmatizer = test_lemmatizer();
        let tokens = vec![TaggedToken::new("Elle", "CLS"), TaggedToken::new("vue", "VPP")];
        assert_eq!(
            lemmatizer.lemmatize_batch(&tokens).unwrap(),
            vec!["elle", "voir"]
        );

        let tokens = vec![
            TokenBuilder::new("ont").pos("V").token(),
            TokenBuilder::new("obtenu").token(),
        ];
        match lemmatizer.lemmatize_batch(&tokens) {
            Err(LemmaError::InvalidArgument(_)) => (),
            other => panic!("Expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    pub fn test_deterministic() {
        let lemmatizer = test_lemmatizer();
        let first = lemmatizer.resolve("parti", "VPP").unwrap();
        for _ in 0..10 {
            assert_eq!(lemmatizer.resolve("parti", "VPP").unwrap(), first);
        }
        assert_eq!(first, "partir");
    }
}
