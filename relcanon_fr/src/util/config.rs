use std::collections::{BTreeMap, HashSet};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::canon::{Canonicalizer, DEFAULT_ETRE_AUXILIARY_VERBS, DEFAULT_STOP_CANON_WORDS};
use crate::dictionary::DictionaryFormat;
use crate::error::ConfigError;
use crate::lemma::PosCompatibilityMap;

/// Resources and word tables used for lemmatization and canonicalization.
///
/// Every table falls back to the built-in French defaults when absent from
/// the configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the lemma dictionary, relative paths are resolved against the
    /// directory of the configuration file.
    pub dictionary: Option<PathBuf>,
    pub dictionary_format: DictionaryFormat,
    stop_canon_words: Option<HashSet<String>>,
    etre_auxiliary_verbs: Option<HashSet<String>>,
    pos_map: Option<BTreeMap<String, Vec<String>>>,
}

impl Config {
    /// Deserializes config from path.
    pub fn from_path<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = read_to_string(path)?;
        let mut config: Config = toml::from_str(&data)?;

        if let (Some(dictionary), Some(parent)) = (config.dictionary.as_mut(), path.parent()) {
            if dictionary.is_relative() {
                *dictionary = parent.join(&*dictionary);
            }
        }

        Ok(config)
    }

    /// Configuration with built-in tables and the given dictionary.
    pub fn with_dictionary<P>(dictionary: P, format: DictionaryFormat) -> Self
    where
        P: Into<PathBuf>,
    {
        Config {
            dictionary: Some(dictionary.into()),
            dictionary_format: format,
            ..Config::default()
        }
    }

    /// The configured dictionary path.
    pub fn dictionary_path(&self) -> Result<&Path, ConfigError> {
        self.dictionary
            .as_deref()
            .ok_or(ConfigError::MissingDictionary)
    }

    pub fn pos_map(&self) -> PosCompatibilityMap {
        match &self.pos_map {
            Some(table) => PosCompatibilityMap::new(table),
            None => PosCompatibilityMap::default(),
        }
    }

    pub fn stop_canon_words(&self) -> HashSet<String> {
        word_set(&self.stop_canon_words, DEFAULT_STOP_CANON_WORDS)
    }

    pub fn etre_auxiliary_verbs(&self) -> HashSet<String> {
        word_set(&self.etre_auxiliary_verbs, DEFAULT_ETRE_AUXILIARY_VERBS)
    }

    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new(self.stop_canon_words(), self.etre_auxiliary_verbs())
    }
}

fn word_set(configured: &Option<HashSet<String>>, defaults: &[&str]) -> HashSet<String> {
    match configured {
        Some(words) => words.iter().map(|word| word.to_lowercase()).collect(),
        None => defaults.iter().map(|&word| word.to_owned()).collect(),
    }
}
