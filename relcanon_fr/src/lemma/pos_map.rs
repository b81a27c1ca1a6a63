use rustc_hash::FxHashMap;

use crate::error::LemmaError;

/// Dictionary tags and the tagger tags they are compatible with. Very
/// approximate.
const DEFAULT_POS_MAP: &[(&str, &[&str])] = &[
    ("adjq", &["adj", "adjwh"]),
    ("adve", &["adv", "advwh"]),
    ("conc", &["cc"]),
    ("cons", &["cs"]),
    ("dete", &["det", "detwh"]),
    ("inte", &["i"]),
    ("nomc", &["nc"]),
    ("num", &["det"]),
    ("ordi", &["det"]),
    ("pred", &["p"]),
    ("pren", &["p"]),
    ("prep", &["p"]),
    ("pron", &["pro", "prorel", "prowh", "cls", "clo", "clr"]),
    ("verb", &["v", "vimp", "vinf", "vpp", "vpr", "vs"]),
];

/// Maps POS tags of the dictionary tagset to the compatible tags of the
/// external tagger.
///
/// All tags are stored lower-cased. The map has to cover every tag the
/// dictionary uses for ambiguous forms: a missing tag is reported as
/// [`LemmaError::UnmappedPos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosCompatibilityMap {
    tags: FxHashMap<String, Vec<String>>,
}

impl PosCompatibilityMap {
    pub fn new<I, K, V, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|(dictionary_pos, compatible)| {
                (
                    dictionary_pos.as_ref().to_lowercase(),
                    compatible
                        .into_iter()
                        .map(|pos| pos.as_ref().to_lowercase())
                        .collect(),
                )
            })
            .collect();

        PosCompatibilityMap { tags }
    }

    /// Returns true iff the dictionary tag `dictionary_pos` is compatible
    /// with the external tag `external_pos`. Comparison ignores case.
    pub fn is_compatible(&self, dictionary_pos: &str, external_pos: &str) -> Result<bool, LemmaError> {
        let compatible = self
            .tags
            .get(dictionary_pos)
            .ok_or_else(|| LemmaError::UnmappedPos(dictionary_pos.to_owned()))?;

        let external_pos = external_pos.to_lowercase();
        Ok(compatible.iter().any(|pos| *pos == external_pos))
    }

    pub fn contains(&self, dictionary_pos: &str) -> bool {
        self.tags.contains_key(dictionary_pos)
    }
}

impl Default for PosCompatibilityMap {
    fn default() -> Self {
        PosCompatibilityMap::new(DEFAULT_POS_MAP.iter().map(|&(k, v)| (k, v.iter())))
    }
}

#[cfg(test)]
mod tests {
    use super::PosCompatibilityMap;
    use crate::error::LemmaError;

    #[test]
    pub fn test_default_map() {
        let map = PosCompatibilityMap::default();
        assert_eq!(map.is_compatible("verb", "V"), Ok(true));
        assert_eq!(map.is_compatible("verb", "vpp"), Ok(true));
        assert_eq!(map.is_compatible("verb", "NC"), Ok(false));
        assert_eq!(map.is_compatible("nomc", "NC"), Ok(true));
        assert_eq!(map.is_compatible("pron", "CLS"), Ok(true));
        assert_eq!(map.is_compatible("num", "DET"), Ok(true));
    }

    #[test]
    pub fn test_unmapped_pos() {
        let map = PosCompatibilityMap::default();
        assert_eq!(
            map.is_compatible("nomp", "NPP"),
            Err(LemmaError::UnmappedPos("nomp".to_owned()))
        );
    }

    #[test]
    pub fn test_custom_map() {
        let map = PosCompatibilityMap::new(vec![("NomP", vec!["NPP"])]);
        assert!(map.contains("nomp"));
        assert!(!map.contains("verb"));
        assert_eq!(map.is_compatible("nomp", "npp"), Ok(true));
        assert_eq!(map.is_compatible("nomp", "NC"), Ok(false));
    }
}
