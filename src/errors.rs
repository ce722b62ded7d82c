//! Error types for the annotator.
//!
//! Initialization failures are fatal and surface as [`InitError`]. Everything
//! that can go wrong while processing a document is recoverable and is
//! collected as a [`ProcessIssue`] instead of being returned as an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::Span;

/// Errors that prevent the annotator from starting.
#[derive(Debug, Error)]
pub enum InitError {
    /// A model, dictionary or configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model file was read but is not a valid model.
    #[error("failed to parse model {path}: {message}")]
    ModelParse { path: PathBuf, message: String },

    /// The model parsed, but has nothing to tag with.
    #[error("model {path} has an empty default tag")]
    EmptyModel { path: PathBuf },

    /// A tag dictionary line could not be parsed.
    #[error("tag dictionary {path} line {line}: {message}")]
    TagDictParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// `useTagDict` is set but no `tagDict` path was configured.
    #[error("useTagDict is enabled but no tagDict path is configured")]
    MissingTagDict,

    /// The configuration file could not be parsed.
    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Result type for initialization.
pub type InitResult<T> = Result<T, InitError>;

/// Errors raised while building a single tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagBuildError {
    /// No variant is registered under this identifier.
    #[error("unknown tag set '{name}'")]
    UnknownTagSet { name: String },

    /// The variant refused to build from the given input.
    #[error("cannot construct {tagset}: {reason}")]
    Construction { tagset: String, reason: String },
}

/// A recoverable problem met while processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessIssue {
    /// The tagger returned fewer tags than the sentence has tokens.
    ShortTaggerOutput {
        sentence: Span,
        expected: usize,
        returned: usize,
    },
    /// A tag for one token could not be built and was skipped.
    TagSkipped { token: Span, error: TagBuildError },
}

impl std::fmt::Display for ProcessIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessIssue::ShortTaggerOutput {
                sentence,
                expected,
                returned,
            } => write!(
                f,
                "sentence {}: tagger returned {} tags for {} tokens",
                sentence, returned, expected
            ),
            ProcessIssue::TagSkipped { token, error } => {
                write!(f, "token {}: {}", token, error)
            }
        }
    }
}
