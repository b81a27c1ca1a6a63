//! Dictionary lemmatization and relation canonicalization for French.
//!
//! Sentences come tokenized, POS-tagged and chunked by an external tagger.
//! This crate repairs their chunk tags, resolves lemmas with a lemma
//! dictionary (using the tagger's POS tags for ambiguous forms) and turns
//! relation phrases into canonical strings.
//!
//! Example usage:
//!
//! ```
//! use std::sync::Arc;
//!
//! use relcanon_fr::{
//!     AnnotatedSentence, Canonicalizer, DictionaryFormat, LemmaDictionary, Lemmatizer,
//!     PosCompatibilityMap, RelationSpan,
//! };
//!
//! // load the lemma dictionary and set up the lemmatizer with the default tag map
//! let dictionary =
//!     LemmaDictionary::from_path("testdata/dictionary.txt", DictionaryFormat::Text).unwrap();
//! let lemmatizer = Lemmatizer::new(Arc::new(dictionary), PosCompatibilityMap::default());
//!
//! let mut sentence = AnnotatedSentence::new(
//!     vec!["Il".into(), "a".into(), "mangé".into(), "du".into(), "pain".into()],
//!     vec!["CLS".into(), "V".into(), "VPP".into(), "P+D".into(), "NC".into()],
//!     vec!["B-VN".into(), "I-VN".into(), "I-VN".into(), "B-NP".into(), "I-NP".into()],
//! )
//! .unwrap();
//!
//! // chunk repairs happen before extraction
//! sentence.normalize_chunks();
//!
//! // the relation "a mangé du" as found by an extractor
//! let span = RelationSpan::new(1, 3);
//! let canon = Canonicalizer::default()
//!     .canonicalize(&mut sentence, span, &lemmatizer)
//!     .unwrap();
//! assert_eq!(canon, "manger de");
//! ```

pub mod canon;
pub use crate::canon::{format_lemmatized_relation, Canonicalizer};

pub mod chunk;
pub use crate::chunk::normalize_chunk_boundaries;

mod dictionary;
pub use crate::dictionary::{DictionaryEntry, DictionaryFormat, LemmaDictionary};

pub mod error;
pub use crate::error::{Error, Result};

mod lemma;
pub use crate::lemma::{
    LazyLemmatizer, LemmaFeatures, Lemmatize, Lemmatizer, PosCompatibilityMap, TaggedToken,
};

mod sentence;
pub use crate::sentence::{AnnotatedSentence, RelationSpan};

mod util;
pub use crate::util::Config;
