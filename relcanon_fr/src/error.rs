//! Error types.
//!
//! Everything in here is a hard failure. Unknown words and unresolved
//! ambiguities are not errors: the lemmatizer falls back to a best-effort
//! lemma for those.

use std::io;

use thiserror::Error;

/// Result type using the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a lemma dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Reading the dictionary failed: {0}")]
    Io(#[from] io::Error),

    /// A text resource line that does not have the `form<TAB>lemma <Tag,...>` shape.
    #[error("Invalid dictionary line {line_number}: {line}")]
    InvalidLine { line_number: usize, line: String },

    #[error("Invalid binary dictionary: {0}")]
    Binary(#[from] bincode::Error),
}

/// Errors raised by lemma resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LemmaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A dictionary tag with no entry in the POS compatibility map.
    #[error("Cannot find dictionary POS tag {0} in the compatibility map")]
    UnmappedPos(String),
}

/// Errors raised by the chunk boundary passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Layer lengths differ: {tokens} tokens, {pos_tags} POS tags, {chunk_tags} chunk tags")]
    LengthMismatch {
        tokens: usize,
        pos_tags: usize,
        chunk_tags: usize,
    },
}

/// Errors raised while canonicalizing a relation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    #[error("Relation span {start}+{length} exceeds sentence length {sentence_len}")]
    InvalidSpan {
        start: usize,
        length: usize,
        sentence_len: usize,
    },

    #[error("Sentence has no lemma layer")]
    MissingLemmaLayer,

    #[error(transparent)]
    Lemma(#[from] LemmaError),
}

/// Errors raised while reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Reading the config failed: {0}")]
    Io(#[from] io::Error),

    #[error("Parsing the config failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No dictionary resource configured")]
    MissingDictionary,
}

/// Umbrella error for callers that touch several components.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Lemma(#[from] LemmaError),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error(transparent)]
    Canon(#[from] CanonError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
