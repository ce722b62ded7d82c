#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Part-of-speech annotation for pre-segmented documents.
//!
//! This crate is a single pipeline stage. It receives a [`Document`] whose
//! sentences and tokens were produced upstream, runs a [`Tagger`] once per
//! sentence, and appends one [`PosTag`] to each token.
//!
//! ## Usage
//!
//! ```
//! use layered_pos_annotator::{Document, DocumentDisplay, PosTagAnnotator};
//!
//! let tagger = |tokens: &[&str]| -> Vec<String> {
//!     tokens
//!         .iter()
//!         .map(|t| if *t == "the" { "DT" } else { "NN" }.to_string())
//!         .collect()
//! };
//! let annotator = PosTagAnnotator::with_tagger(tagger).with_tagset("PennBioIEPOSTag");
//!
//! let mut doc = Document::new("the dose");
//! doc.add_sentence(0, 8);
//! doc.add_token(0, 3);
//! doc.add_token(4, 8);
//!
//! let report = annotator.process(&mut doc);
//! assert_eq!(report.tags_attached, 2);
//! println!("{}", DocumentDisplay::new(&doc));
//! ```
//!
//! With a model on disk, build the annotator from an [`AnnotatorConfig`]
//! through [`PosTagAnnotator::initialize`] instead.
//!
//! ## Tag sets
//!
//! Tags are built by name through a [`TagSetRegistry`]. The Penn, Genia and
//! PennBioIE tag sets are registered by default; other tag sets are added with
//! [`TagSetRegistry::register`] without touching the annotator.

mod annotator;
mod config;
mod display;
mod document;
mod errors;
mod extractor;
mod tag;
pub mod tagger;
mod tagset;

pub use annotator::{AnnotationReport, PosTagAnnotator, COMPONENT_ID};
pub use config::AnnotatorConfig;
pub use display::DocumentDisplay;
pub use document::{Document, Sentence, Span, TagId, Token};
pub use errors::{InitError, InitResult, ProcessIssue, TagBuildError};
pub use extractor::{sentence_tokens, SentenceToken, SentenceTokens};
pub use tag::{GeniaPOSTag, PennBioIEPOSTag, PennPOSTag, PosTag, PosTagAny, TagInit};
pub use tagger::{SentenceTags, Tagger};
pub use tagset::{TagFactory, TagSetRegistry};

#[cfg(test)]
mod tests;
