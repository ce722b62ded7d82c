//! Pre-segmented documents.
//!
//! A [`Document`] is produced upstream: its text, sentences and tokens are
//! fixed by the time the annotator sees it. The annotator only registers new
//! tags and appends them to the tokens' tag collections.

use std::fmt;

use tracing::warn;

use crate::tag::PosTagAny;

/// A half-open `[begin, end)` byte range into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// Handle to a tag registered with a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(usize);

impl TagId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
    /// `None` until the first tag is attached.
    pos_tags: Option<Vec<TagId>>,
}

impl Token {
    /// Tags attached to this token, in attachment order.
    pub fn pos_tags(&self) -> Option<&[TagId]> {
        self.pos_tags.as_deref()
    }
}

/// Text plus its sentence and token spans, and every tag registered on it.
///
/// Sentences and tokens keep the indices they were added with; consumers that
/// need text order sort by span (see [`sentence_tokens`](crate::sentence_tokens)).
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    tokens: Vec<Token>,
    tags: Vec<Box<dyn PosTagAny>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("text_len", &self.text.len())
            .field("sentence_count", &self.sentences.len())
            .field("token_count", &self.tokens.len())
            .field("tag_count", &self.tags.len())
            .finish()
    }
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentences: Vec::new(),
            tokens: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Add a sentence span, returning its index.
    pub fn add_sentence(&mut self, begin: usize, end: usize) -> usize {
        self.sentences.push(Sentence {
            span: Span::new(begin, end),
        });
        self.sentences.len() - 1
    }

    /// Add a token span, returning its index.
    pub fn add_token(&mut self, begin: usize, end: usize) -> usize {
        self.tokens.push(Token {
            span: Span::new(begin, end),
            pos_tags: None,
        });
        self.tokens.len() - 1
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The text covered by `span`, or `None` when the span is out of range,
    /// inverted, or splits a character.
    pub fn span_text(&self, span: Span) -> Option<&str> {
        self.text.get(span.begin..span.end)
    }

    /// Like [`span_text`](Self::span_text), but a bad span logs a warning and
    /// yields `""`.
    pub fn covered_text(&self, span: Span) -> &str {
        match self.span_text(span) {
            Some(text) => text,
            None => {
                warn!(
                    span = %span,
                    text_len = self.text.len(),
                    "span does not fall on valid text boundaries, using empty text"
                );
                ""
            }
        }
    }

    /// Register a tag so it can be addressed by its [`TagId`].
    pub fn register_tag(&mut self, tag: Box<dyn PosTagAny>) -> TagId {
        self.tags.push(tag);
        TagId(self.tags.len() - 1)
    }

    /// Append a registered tag to a token's tag collection.
    ///
    /// Tags already attached keep their positions; the new one goes last.
    /// Returns false if `token` is out of range.
    pub fn attach_tag(&mut self, token: usize, tag: TagId) -> bool {
        let token = match self.tokens.get_mut(token) {
            Some(token) => token,
            None => return false,
        };
        match &mut token.pos_tags {
            Some(existing) => existing.push(tag),
            None => {
                let mut collection = Vec::with_capacity(1);
                collection.push(tag);
                token.pos_tags = Some(collection);
            }
        }
        true
    }

    pub fn tag(&self, id: TagId) -> Option<&dyn PosTagAny> {
        self.tags.get(id.0).map(|tag| tag.as_ref())
    }

    /// All registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = (TagId, &dyn PosTagAny)> {
        self.tags
            .iter()
            .enumerate()
            .map(|(idx, tag)| (TagId(idx), tag.as_ref()))
    }

    /// Tags attached to the token at `token`, in attachment order.
    pub fn token_tags(&self, token: usize) -> impl Iterator<Item = &dyn PosTagAny> {
        self.tokens
            .get(token)
            .and_then(|token| token.pos_tags())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| self.tag(*id))
    }
}
