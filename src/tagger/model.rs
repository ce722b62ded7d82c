//! Lexicon model loaded from a RON file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{InitError, InitResult};

/// A word-lookup POS model.
///
/// ```ron
/// (
///     default_tag: "NN",
///     number_tag: Some("CD"),
///     lexicon: { "the": "DT", "on": "IN" },
///     suffixes: [("ing", "VBG"), ("ly", "RB")],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconModel {
    /// Tag for words nothing else matches.
    pub default_tag: String,
    /// Tag for words made of digits and numeric punctuation.
    #[serde(default)]
    pub number_tag: Option<String>,
    #[serde(default)]
    pub lexicon: HashMap<String, String>,
    /// Suffix rules; the longest matching suffix wins.
    #[serde(default)]
    pub suffixes: Vec<(String, String)>,
}

impl LexiconModel {
    /// Read and parse a model file.
    pub fn load(path: &Path) -> InitResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| InitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: LexiconModel =
            ron::from_str(&content).map_err(|e| InitError::ModelParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if model.default_tag.trim().is_empty() {
            return Err(InitError::EmptyModel {
                path: path.to_path_buf(),
            });
        }
        Ok(model)
    }

    /// Best tag for a single word.
    pub fn guess(&self, word: &str) -> &str {
        if let Some(tag) = self.lexicon.get(word) {
            return tag;
        }
        let lower = word.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return tag;
        }
        if let Some(tag) = &self.number_tag {
            if is_number(word) {
                return tag;
            }
        }
        self.suffixes
            .iter()
            .filter(|(suffix, _)| lower.len() > suffix.len() && lower.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, tag)| tag.as_str())
            .unwrap_or(self.default_tag.as_str())
    }
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/'))
}
