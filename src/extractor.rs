//! Groups a document's tokens by sentence.

use std::cmp::Reverse;

use crate::{Document, Sentence, Span, Token};

/// A token inside a sentence, with its covered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceToken<'a> {
    /// Index of the token in [`Document::tokens`].
    pub index: usize,
    pub span: Span,
    pub text: &'a str,
}

/// One sentence and the tokens it contains, in text order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTokens<'a> {
    pub sentence: &'a Sentence,
    pub tokens: Vec<SentenceToken<'a>>,
}

impl<'a> SentenceTokens<'a> {
    /// The token texts, ready to hand to a tagger.
    pub fn texts(&self) -> Vec<&'a str> {
        self.tokens.iter().map(|token| token.text).collect()
    }
}

/// Earlier begin first; on equal begins the longer span comes first.
fn text_order(span: Span) -> (usize, Reverse<usize>) {
    (span.begin, Reverse(span.end))
}

/// Pair each sentence with the tokens its span contains.
///
/// Sentences and tokens come out in text order, whatever order they were
/// added in. Spans that compare equal keep their insertion order. Both are
/// sorted once per call; each sentence then seeks to its first token, so a
/// sentence only visits the tokens near it.
pub fn sentence_tokens(doc: &Document) -> impl Iterator<Item = SentenceTokens<'_>> {
    let mut sentences: Vec<&Sentence> = doc.sentences().iter().collect();
    sentences.sort_by_key(|sentence| text_order(sentence.span));

    let mut ordered: Vec<(usize, &Token)> = doc.tokens().iter().enumerate().collect();
    ordered.sort_by_key(|(_, token)| text_order(token.span));

    sentences.into_iter().map(move |sentence| {
        let span = sentence.span;
        let start = ordered.partition_point(|(_, token)| token.span.begin < span.begin);
        SentenceTokens {
            sentence,
            tokens: ordered[start..]
                .iter()
                .take_while(|(_, token)| token.span.begin <= span.end)
                .filter(|(_, token)| span.contains(token.span))
                .map(|&(index, token)| SentenceToken {
                    index,
                    span: token.span,
                    text: doc.covered_text(token.span),
                })
                .collect(),
        }
    })
}
