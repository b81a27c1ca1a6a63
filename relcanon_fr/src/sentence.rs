use crate::chunk::normalize_chunk_boundaries;
use crate::error::{CanonError, ChunkError, LemmaError};
use crate::lemma::{Lemmatize, TaggedToken};

/// A tokenized, POS-tagged and chunked sentence.
///
/// The lemma layer is computed at most once, see
/// [`AnnotatedSentence::ensure_lemma_layer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSentence {
    tokens: Vec<String>,
    pos_tags: Vec<String>,
    chunk_tags: Vec<String>,
    lemmas: Option<Vec<String>>,
}

impl AnnotatedSentence {
    /// Fails if the layers do not have the same length.
    pub fn new(
        tokens: Vec<String>,
        pos_tags: Vec<String>,
        chunk_tags: Vec<String>,
    ) -> Result<Self, ChunkError> {
        if tokens.len() != pos_tags.len() || tokens.len() != chunk_tags.len() {
            return Err(ChunkError::LengthMismatch {
                tokens: tokens.len(),
                pos_tags: pos_tags.len(),
                chunk_tags: chunk_tags.len(),
            });
        }

        Ok(AnnotatedSentence {
            tokens,
            pos_tags,
            chunk_tags,
            lemmas: None,
        })
    }

    /// Uses lemmas computed elsewhere as the lemma layer.
    pub fn with_lemmas(mut self, lemmas: Vec<String>) -> Result<Self, ChunkError> {
        if lemmas.len() != self.tokens.len() {
            return Err(ChunkError::LengthMismatch {
                tokens: self.tokens.len(),
                pos_tags: self.pos_tags.len(),
                chunk_tags: self.chunk_tags.len(),
            });
        }

        self.lemmas = Some(lemmas);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn pos_tags(&self) -> &[String] {
        &self.pos_tags
    }

    pub fn chunk_tags(&self) -> &[String] {
        &self.chunk_tags
    }

    pub fn lemmas(&self) -> Option<&[String]> {
        self.lemmas.as_deref()
    }

    /// Repairs chunk boundaries around clitics, punctuation and "de".
    pub fn normalize_chunks(&mut self) {
        // layer lengths are checked on construction
        let result = normalize_chunk_boundaries(&self.tokens, &self.pos_tags, &mut self.chunk_tags);
        debug_assert!(result.is_ok());
    }

    /// Adds the lemma layer unless it is already present.
    pub fn ensure_lemma_layer<L>(&mut self, lemmatizer: &L) -> Result<&[String], LemmaError>
    where
        L: Lemmatize,
    {
        if self.lemmas.is_none() {
            let tokens: Vec<_> = self
                .tokens
                .iter()
                .zip(&self.pos_tags)
                .map(|(form, pos)| TaggedToken::new(form, pos))
                .collect();
            let lemmas = lemmatizer.lemmatize_batch(&tokens)?;
            if lemmas.len() != tokens.len() {
                return Err(LemmaError::InvalidArgument(format!(
                    "{} lemmas for {} tokens",
                    lemmas.len(),
                    tokens.len()
                )));
            }
            self.lemmas = Some(lemmas);
        }

        Ok(self.lemmas.as_deref().unwrap_or_default())
    }

    /// Tokens, POS tags and chunk tags as three lines, with each column
    /// centered on its widest field.
    pub fn format_aligned(&self) -> [String; 3] {
        let mut lines = [String::new(), String::new(), String::new()];

        for ((token, pos), chunk) in self.tokens.iter().zip(&self.pos_tags).zip(&self.chunk_tags) {
            let fields = [token, pos, chunk];
            let width = fields.iter().map(|f| f.chars().count()).max().unwrap_or(0);

            for (line, field) in lines.iter_mut().zip(&fields) {
                let padding = width - field.chars().count();
                line.push_str(&" ".repeat(padding / 2));
                line.push_str(field);
                line.push_str(&" ".repeat((padding + 1) / 2));
                line.push(' ');
            }
        }

        lines
    }
}

/// A contiguous range of tokens, the relation of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationSpan {
    pub start: usize,
    pub length: usize,
}

impl RelationSpan {
    pub fn new(start: usize, length: usize) -> Self {
        RelationSpan { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Checks that the span lies within a sentence of `sentence_len` tokens.
    pub fn check(&self, sentence_len: usize) -> Result<(), CanonError> {
        match self.start.checked_add(self.length) {
            Some(end) if end <= sentence_len => Ok(()),
            _ => Err(CanonError::InvalidSpan {
                start: self.start,
                length: self.length,
                sentence_len,
            }),
        }
    }
}
