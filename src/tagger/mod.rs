//! The tagger seam.
//!
//! The annotator treats the tagger as an opaque function from token texts to
//! tag strings. [`DictionaryTagger`] is the model-backed implementation loaded
//! at initialization; any closure with the right shape works too.

mod dictionary;
mod model;

pub use dictionary::{CasePolicy, DictLineError, TagDictionary};
pub use model::LexiconModel;

/// Maps the token texts of one sentence to their tags.
///
/// Implementations must return one tag per input token, in input order.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<String>;
}

impl<F> Tagger for F
where
    F: Fn(&[&str]) -> Vec<String> + Send + Sync,
{
    fn tag(&self, tokens: &[&str]) -> Vec<String> {
        self(tokens)
    }
}

/// Tagger output checked against the sentence it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceTags {
    /// One tag per token.
    Aligned(Vec<String>),
    /// Fewer tags than tokens; `tags` covers only a prefix of the sentence.
    Short { tags: Vec<String>, expected: usize },
}

impl SentenceTags {
    /// Compare tagger output with the number of tokens it should cover.
    ///
    /// Surplus tags are dropped.
    pub fn align(expected: usize, mut tags: Vec<String>) -> Self {
        if tags.len() < expected {
            SentenceTags::Short { tags, expected }
        } else {
            tags.truncate(expected);
            SentenceTags::Aligned(tags)
        }
    }

    /// The tags that line up with tokens, position for position.
    pub fn tags(&self) -> &[String] {
        match self {
            SentenceTags::Aligned(tags) => tags,
            SentenceTags::Short { tags, .. } => tags,
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, SentenceTags::Aligned(_))
    }
}

/// A lexicon model, optionally constrained by a tag dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryTagger {
    model: LexiconModel,
    dictionary: Option<TagDictionary>,
}

impl DictionaryTagger {
    pub fn new(model: LexiconModel) -> Self {
        Self {
            model,
            dictionary: None,
        }
    }

    pub fn with_dictionary(mut self, dictionary: TagDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn model(&self) -> &LexiconModel {
        &self.model
    }

    pub fn dictionary(&self) -> Option<&TagDictionary> {
        self.dictionary.as_ref()
    }

    fn tag_word(&self, word: &str) -> String {
        let guess = self.model.guess(word);
        match self.dictionary.as_ref().and_then(|dict| dict.allowed(word)) {
            Some(allowed) if !allowed.iter().any(|tag| tag == guess) => allowed[0].clone(),
            _ => guess.to_string(),
        }
    }
}

impl Tagger for DictionaryTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|word| self.tag_word(word)).collect()
    }
}
