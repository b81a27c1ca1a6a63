mod lazy;
pub use self::lazy::LazyLemmatizer;

mod lemmatizer;
pub use self::lemmatizer::Lemmatizer;

mod pos_map;
pub use self::pos_map::PosCompatibilityMap;

use crate::error::LemmaError;

/// Trait for lemmatization
pub trait Lemmatize {
    /// Returns one lemma per token, in input order.
    fn lemmatize_batch<T>(&self, tokens: &[T]) -> Result<Vec<String>, LemmaError>
    where
        T: LemmaFeatures;
}

/// Trait defining the minimal accessors needed to look up a lemma.
///
/// The POS tag is optional since input formats may leave it out. A token
/// without one cannot be lemmatized.
pub trait LemmaFeatures {
    fn form(&self) -> &str;
    fn pos(&self) -> Option<&str>;
}

/// A borrowed form with its POS tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedToken<'a> {
    pub form: &'a str,
    pub pos: &'a str,
}

impl<'a> TaggedToken<'a> {
    pub fn new(form: &'a str, pos: &'a str) -> Self {
        TaggedToken { form, pos }
    }
}

impl<'a> LemmaFeatures for TaggedToken<'a> {
    fn form(&self) -> &str {
        self.form
    }

    fn pos(&self) -> Option<&str> {
        Some(self.pos)
    }
}

/// LemmaFeatures for conllx::Token, using the fine-grained tag and falling
/// back to the coarse one.
impl LemmaFeatures for conllx::Token {
    fn form(&self) -> &str {
        self.form()
    }

    fn pos(&self) -> Option<&str> {
        self.pos().or_else(|| self.cpos())
    }
}

#[cfg(test)]
mod tests {
    use conllx::TokenBuilder;

    use super::{LemmaFeatures, TaggedToken};

    #[test]
    pub fn test_conllx_features() {
        let token = TokenBuilder::new("Mangé").cpos("V").pos("VPP").token();
        assert_eq!(LemmaFeatures::form(&token), "Mangé");
        assert_eq!(LemmaFeatures::pos(&token), Some("VPP"));

        let token = TokenBuilder::new("pain").cpos("NC").token();
        assert_eq!(LemmaFeatures::pos(&token), Some("NC"));

        let token = TokenBuilder::new("pain").token();
        assert_eq!(LemmaFeatures::pos(&token), None);
    }

    #[test]
    pub fn test_tagged_token() {
        let token = TaggedToken::new("ont", "V");
        assert_eq!(token.form(), "ont");
        assert_eq!(LemmaFeatures::pos(&token), Some("V"));
    }
}
