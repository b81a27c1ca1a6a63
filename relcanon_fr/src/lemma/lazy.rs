use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::dictionary::LemmaDictionary;
use crate::error::Result;
use crate::lemma::Lemmatizer;
use crate::util::Config;

/// Lemmatizer that loads its dictionary on first use.
///
/// Concurrent first calls are serialized, so the dictionary is read exactly
/// once. A failed load is returned to the caller and retried by the next
/// call. Share it by reference (or behind an `Arc`).
#[derive(Debug)]
pub struct LazyLemmatizer {
    config: Config,
    lemmatizer: OnceCell<Lemmatizer>,
}

impl LazyLemmatizer {
    pub fn new(config: Config) -> Self {
        LazyLemmatizer {
            config,
            lemmatizer: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the lemmatizer, loading the dictionary if needed.
    pub fn get(&self) -> Result<&Lemmatizer> {
        self.lemmatizer.get_or_try_init(|| {
            let path = self.config.dictionary_path()?;
            log::info!("Loading lemma dictionary from {}", path.display());
            let dictionary = LemmaDictionary::from_path(path, self.config.dictionary_format)?;
            Ok(Lemmatizer::new(Arc::new(dictionary), self.config.pos_map()))
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.lemmatizer.get().is_some()
    }
}
