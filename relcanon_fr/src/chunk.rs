//! Chunk tag repairs applied before extraction.
//!
//! The tagger/chunker output is not quite what the relation patterns expect
//! for French. Each pass rewrites chunk tags in place and is idempotent.
//!
//! ```text
//! TOKS     C'  est   la  plus importante ville francophone  d'  Amérique   .
//! POS     CLS   V   DET  ADV     ADJ      NC       ADJ      P     NPP    PONCT
//! CHNK    B-VN I-VN B-NP I-NP    I-NP    I-NP     B-AP     B-PP   B-NP     O
//! ```
//!
//! Here the subject clitic has to become a noun phrase of its own, with the
//! verb group starting at "est".

use crate::error::ChunkError;

pub const BEGIN_NP: &str = "B-NP";
pub const IN_NP: &str = "I-NP";
pub const OUTSIDE: &str = "O";

/// Spellings of the preposition "de".
pub const DE_VARIANTS: &[&str] = &["de", "du", "des", "d'"];

/// Applies [`fix_clitics`], [`fix_punctuation_chunks`] and [`attach_de`], in
/// that order.
pub fn normalize_chunk_boundaries<S>(
    tokens: &[S],
    pos_tags: &[S],
    chunk_tags: &mut [String],
) -> Result<(), ChunkError>
where
    S: AsRef<str>,
{
    check_lengths(tokens.len(), pos_tags.len(), chunk_tags.len())?;

    fix_clitics(pos_tags, chunk_tags);
    fix_punctuation_chunks(pos_tags, chunk_tags);
    attach_de(tokens, chunk_tags);

    Ok(())
}

/// Turns a subject clitic starting a verb group (`CLS`/`B-VN`) into a noun
/// phrase. The verb group then starts at the next token.
pub fn fix_clitics<S>(pos_tags: &[S], chunk_tags: &mut [String])
where
    S: AsRef<str>,
{
    for i in 0..pos_tags.len().min(chunk_tags.len()) {
        if pos_tags[i].as_ref().eq_ignore_ascii_case("CLS")
            && chunk_tags[i].eq_ignore_ascii_case("B-VN")
        {
            chunk_tags[i] = BEGIN_NP.to_owned();
            begin_next_chunk(chunk_tags, i);
        }
    }
}

/// Takes punctuation out of noun phrases.
pub fn fix_punctuation_chunks<S>(pos_tags: &[S], chunk_tags: &mut [String])
where
    S: AsRef<str>,
{
    for i in 0..pos_tags.len().min(chunk_tags.len()) {
        if pos_tags[i].as_ref().eq_ignore_ascii_case("PONCT")
            && (chunk_tags[i].eq_ignore_ascii_case(IN_NP)
                || chunk_tags[i].eq_ignore_ascii_case(BEGIN_NP))
        {
            chunk_tags[i] = OUTSIDE.to_owned();
            begin_next_chunk(chunk_tags, i);
        }
    }
}

/// Merges a noun phrase starting with "de" into the preceding noun phrase.
///
/// The first and last tokens are never considered.
pub fn attach_de<S>(tokens: &[S], chunk_tags: &mut [String])
where
    S: AsRef<str>,
{
    let n = tokens.len().min(chunk_tags.len());
    for i in 1..n.saturating_sub(1) {
        if DE_VARIANTS.contains(&tokens[i].as_ref())
            && is_in_np_chunk(&chunk_tags[i - 1])
            && is_in_np_chunk(&chunk_tags[i + 1])
        {
            chunk_tags[i] = IN_NP.to_owned();
            chunk_tags[i + 1] = IN_NP.to_owned();
        }
    }
}

pub fn is_in_np_chunk(chunk_tag: &str) -> bool {
    chunk_tag == BEGIN_NP || chunk_tag == IN_NP
}

// I-X after position i becomes B-X
fn begin_next_chunk(chunk_tags: &mut [String], i: usize) {
    if let Some(next) = chunk_tags.get_mut(i + 1) {
        if let Some(chunk_type) = next.strip_prefix("I-") {
            *next = format!("B-{}", chunk_type);
        }
    }
}

fn check_lengths(tokens: usize, pos_tags: usize, chunk_tags: usize) -> Result<(), ChunkError> {
    if tokens != pos_tags || tokens != chunk_tags {
        return Err(ChunkError::LengthMismatch {
            tokens,
            pos_tags,
            chunk_tags,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{attach_de, fix_clitics, fix_punctuation_chunks, normalize_chunk_boundaries};
    use crate::error::ChunkError;

    fn strings(s: &str) -> Vec<String> {
        s.split_whitespace().map(ToOwned::to_owned).collect()
    }

    #[test]
    pub fn test_fix_clitics() {
        let pos = strings("CLS V DET NC");
        let mut chunks = strings("B-VN I-VN B-NP I-NP");
        fix_clitics(&pos, &mut chunks);
        assert_eq!(chunks, strings("B-NP B-VN B-NP I-NP"));

        // only subject clitics
        let pos = strings("CLO V");
        let mut chunks = strings("B-VN I-VN");
        fix_clitics(&pos, &mut chunks);
        assert_eq!(chunks, strings("B-VN I-VN"));

        // clitic at the end of the sentence
        let pos = strings("V cls");
        let mut chunks = strings("O b-vn");
        fix_clitics(&pos, &mut chunks);
        assert_eq!(chunks, strings("O B-NP"));
    }

    #[test]
    pub fn test_fix_punctuation() {
        let pos = strings("DET NC PONCT NC ADJ");
        let mut chunks = strings("B-NP I-NP I-NP I-NP I-NP");
        fix_punctuation_chunks(&pos, &mut chunks);
        assert_eq!(chunks, strings("B-NP I-NP O B-NP I-NP"));

        // next token outside or starting a chunk is left alone
        let pos = strings("PONCT PONCT NC");
        let mut chunks = strings("B-NP O B-NP");
        fix_punctuation_chunks(&pos, &mut chunks);
        assert_eq!(chunks, strings("O O B-NP"));

        // punctuation in other chunk types is left alone
        let pos = strings("V PONCT");
        let mut chunks = strings("B-VN I-VN");
        fix_punctuation_chunks(&pos, &mut chunks);
        assert_eq!(chunks, strings("B-VN I-VN"));
    }

    #[test]
    pub fn test_attach_de() {
        let tokens = strings("la ville de Montréal est belle");
        let mut chunks = strings("B-NP I-NP B-NP I-NP B-VN B-AP");
        attach_de(&tokens, &mut chunks);
        assert_eq!(chunks, strings("B-NP I-NP I-NP I-NP B-VN B-AP"));

        let tokens = strings("NP1 de NP2");
        let mut chunks = strings("B-NP I-NP B-NP");
        attach_de(&tokens, &mut chunks);
        assert_eq!(chunks, strings("B-NP I-NP I-NP"));

        // left neighbour is not in a noun phrase
        let tokens = strings("parle d' Amérique");
        let mut chunks = strings("B-VN B-PP B-NP");
        attach_de(&tokens, &mut chunks);
        assert_eq!(chunks, strings("B-VN B-PP B-NP"));

        // first and last positions are skipped
        let tokens = strings("de NP");
        let mut chunks = strings("B-NP B-NP");
        attach_de(&tokens, &mut chunks);
        assert_eq!(chunks, strings("B-NP B-NP"));

        let tokens: Vec<String> = Vec::new();
        let mut chunks: Vec<String> = Vec::new();
        attach_de(&tokens, &mut chunks);
        assert!(chunks.is_empty());
    }

    #[test]
    pub fn test_normalize_idempotent() {
        let tokens = strings("Il parle du prix des pommes , des poires");
        let pos = strings("CLS V P+D NC P+D NC PONCT P+D NC");
        let mut chunks = strings("B-VN I-VN B-NP I-NP B-NP I-NP I-NP I-NP I-NP");

        normalize_chunk_boundaries(&tokens, &pos, &mut chunks).unwrap();
        let expected = strings("B-NP B-VN B-NP I-NP I-NP I-NP O B-NP I-NP");
        assert_eq!(chunks, expected);

        normalize_chunk_boundaries(&tokens, &pos, &mut chunks).unwrap();
        assert_eq!(chunks, expected);
    }

    #[test]
    pub fn test_length_mismatch() {
        let tokens = strings("Il parle");
        let pos = strings("CLS V");
        let mut chunks = strings("B-VN");
        assert_eq!(
            normalize_chunk_boundaries(&tokens, &pos, &mut chunks),
            Err(ChunkError::LengthMismatch {
                tokens: 2,
                pos_tags: 2,
                chunk_tags: 1
            })
        );
    }
}
