//! Tag dictionaries restricting the tags a word may take.
//!
//! The file format is one entry per line, a word followed by its allowed
//! tags, whitespace separated:
//!
//! ```text
//! # comment
//! run VB VBP NN
//! the DT
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::{InitError, InitResult};

/// How dictionary lookups treat letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    Sensitive,
    Insensitive,
}

impl CasePolicy {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            CasePolicy::Sensitive
        } else {
            CasePolicy::Insensitive
        }
    }

    fn key(self, word: &str) -> String {
        match self {
            CasePolicy::Sensitive => word.to_string(),
            CasePolicy::Insensitive => word.to_lowercase(),
        }
    }
}

/// A malformed dictionary line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct DictLineError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDictionary {
    entries: HashMap<String, Vec<String>>,
    policy: CasePolicy,
}

impl TagDictionary {
    /// Read and parse a dictionary file.
    pub fn load(path: &Path, policy: CasePolicy) -> InitResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| InitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, policy).map_err(|e| InitError::TagDictParse {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }

    /// Parse dictionary text. Repeated words merge their tag lists.
    pub fn parse(content: &str, policy: CasePolicy) -> Result<Self, DictLineError> {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(word) => word,
                None => continue,
            };
            let tags: Vec<&str> = fields.collect();
            if tags.is_empty() {
                return Err(DictLineError {
                    line: idx + 1,
                    message: format!("word '{}' has no tags", word),
                });
            }

            let allowed = entries.entry(policy.key(word)).or_default();
            for tag in tags {
                if !allowed.iter().any(|existing| existing == tag) {
                    allowed.push(tag.to_string());
                }
            }
        }

        Ok(Self { entries, policy })
    }

    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags allowed for `word`, in file order. `None` if the word is unlisted.
    pub fn allowed(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(&self.policy.key(word))
            .map(|tags| tags.as_slice())
    }
}
