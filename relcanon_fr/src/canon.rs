use std::collections::HashSet;

use crate::error::CanonError;
use crate::lemma::Lemmatize;
use crate::sentence::{AnnotatedSentence, RelationSpan};

/// Adverbs that carry no meaning in a canonical relation.
pub const DEFAULT_STOP_CANON_WORDS: &[&str] = &[
    "également",
    "aussi",
    "alors",
    "donc",
    "ainsi",
    "très",
    "souvent",
    "notamment",
    "déjà",
    "bien",
    "cependant",
    "toutefois",
    "peut-être",
    "pratiquement",
    "clairement",
    "réellement",
    "récemment",
    "graduellement",
    "publiquement",
    "véritablement",
    "traditionnellement",
    "nettement",
    "indéniablement",
];

/// Verbs conjugated with the auxiliary "être" only.
pub const DEFAULT_ETRE_AUXILIARY_VERBS: &[&str] = &[
    "accourir",
    "advenir",
    "aller",
    "apparaître",
    "arriver",
    "décéder",
    "descendre",
    "devenir",
    "entrer",
    "intervenir",
    "monter",
    "mourir",
    "naître",
    "partir",
    "parvenir",
    "redescendre",
    "remonter",
    "rentrer",
    "repartir",
    "ressortir",
    "rester",
    "retomber",
    "retourner",
    "revenir",
    "sortir",
    "survenir",
    "tomber",
    "venir",
];

/// Produces canonical relation strings: lemmatized, without auxiliaries
/// that carry no meaning, without stop adverbs, and with "ne ... pas"
/// collapsed to "ne pas".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonicalizer {
    stop_words: HashSet<String>,
    etre_verbs: HashSet<String>,
}

impl Canonicalizer {
    pub fn new(stop_words: HashSet<String>, etre_verbs: HashSet<String>) -> Self {
        Canonicalizer {
            stop_words,
            etre_verbs,
        }
    }

    /// Canonical form of the relation `span` of `sentence`. The lemma layer
    /// is added first if the sentence has none.
    pub fn canonicalize<L>(
        &self,
        sentence: &mut AnnotatedSentence,
        span: RelationSpan,
        lemmatizer: &L,
    ) -> Result<String, CanonError>
    where
        L: Lemmatize,
    {
        span.check(sentence.len())?;
        sentence.ensure_lemma_layer(lemmatizer)?;
        self.canonicalize_lemmatized(sentence, span)
    }

    /// Like [`Canonicalizer::canonicalize`], for a sentence that already has
    /// its lemma layer.
    pub fn canonicalize_lemmatized(
        &self,
        sentence: &AnnotatedSentence,
        span: RelationSpan,
    ) -> Result<String, CanonError> {
        span.check(sentence.len())?;
        let lemmas = sentence.lemmas().ok_or(CanonError::MissingLemmaLayer)?;

        // deleted words become None
        let mut canon: Vec<Option<&str>> = lemmas[span.start..span.end()]
            .iter()
            .map(|lemma| Some(expand_elision(lemma)))
            .collect();

        if let Some(auxiliary) = self.elided_auxiliary(lemmas, sentence.pos_tags(), span) {
            canon[auxiliary - span.start] = None;
        }

        for slot in canon.iter_mut() {
            if slot.map_or(false, |lemma| self.stop_words.contains(lemma)) {
                *slot = None;
            }
        }

        move_negation(&mut canon);

        Ok(canon
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_owned())
    }

    /// Sentence position of an auxiliary that should be dropped, if any.
    ///
    /// "avoir" followed by a past participle is always dropped. "être" is
    /// dropped for verbs that only conjugate with "être", and when a clitic
    /// precedes the auxiliary (taken as a pronominal verb).
    fn elided_auxiliary(
        &self,
        lemmas: &[String],
        pos_tags: &[String],
        span: RelationSpan,
    ) -> Option<usize> {
        let mut clitic = None;
        let mut auxiliary = None;
        let mut participle = None;
        let mut etre = false;

        for i in span.start..span.end() {
            let pos = pos_tags[i].as_str();
            let lemma = lemmas[i].to_lowercase();

            if pos.starts_with("CL") {
                clitic = Some(i);
            } else if (lemma == "avoir" || lemma == "être") && pos.eq_ignore_ascii_case("V") {
                auxiliary = Some(i);
                etre = lemma == "être";
            } else if pos.eq_ignore_ascii_case("VPP") {
                participle = Some(i);
            }
        }

        let (auxiliary, participle) = match (auxiliary, participle) {
            (Some(auxiliary), Some(participle)) if participle > auxiliary => (auxiliary, participle),
            _ => return None,
        };

        if !etre
            || self.etre_verbs.contains(&lemmas[participle].to_lowercase())
            || clitic.map_or(false, |clitic| clitic > 0 && clitic < auxiliary)
        {
            Some(auxiliary)
        } else {
            None
        }
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::new(
            DEFAULT_STOP_CANON_WORDS.iter().map(|&w| w.to_owned()).collect(),
            DEFAULT_ETRE_AUXILIARY_VERBS.iter().map(|&w| w.to_owned()).collect(),
        )
    }
}

/// Lemmas of `span` joined by spaces, without any normalization.
pub fn format_lemmatized_relation(
    sentence: &AnnotatedSentence,
    span: RelationSpan,
) -> Result<String, CanonError> {
    span.check(sentence.len())?;
    let lemmas = sentence.lemmas().ok_or(CanonError::MissingLemmaLayer)?;
    Ok(lemmas[span.start..span.end()].join(" ").trim().to_owned())
}

fn expand_elision(lemma: &str) -> &str {
    match lemma {
        "n'" => "ne",
        "j'" => "je",
        "qu'" => "que",
        "au" => "à",
        // also the partitive
        "du" => "de",
        _ => lemma,
    }
}

// ne subir pas de -> ne pas subir de, only when the relation starts with "ne"
fn move_negation(canon: &mut Vec<Option<&str>>) {
    if canon.len() < 2 || canon[0] != Some("ne") {
        return;
    }

    let negation = canon
        .iter()
        .enumerate()
        .skip(2)
        .find(|(_, lemma)| matches!(lemma, Some("pas") | Some("plus")))
        .map(|(i, _)| i);

    if let Some(i) = negation {
        let word = canon[i].take();
        canon.insert(1, word);
    }
}
