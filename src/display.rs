use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::extractor::sentence_tokens;
use crate::Document;

/// Renders each sentence's tokens with the tags attached to them.
///
/// ```text
/// A  study  on
/// ╰PennPOSTag("DT")
///    ╰───╯PennPOSTag("NN")
///           ╰╯PennPOSTag("IN")
/// ```
///
/// Sentences are separated by a blank line. Tokens outside every sentence
/// are not shown.
pub struct DocumentDisplay<'a> {
    doc: &'a Document,
    show_language: bool,
    show_component: bool,
}

impl<'a> std::fmt::Display for DocumentDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;

        for (sentence_idx, sentence) in sentence_tokens(self.doc).enumerate() {
            if sentence_idx > 0 {
                f.write_str("\n\n")?;
            }

            let mut token_idx_to_start_display_char_idx = Vec::new();
            let mut token_idx_to_end_display_char_idx = Vec::new();
            let mut opening_line = String::new();
            for (idx, token) in sentence.tokens.iter().enumerate() {
                if idx > 0 {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }
                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                opening_line.push_str(token.text);
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
            f.write_str(&opening_line)?;

            for (idx, token) in sentence.tokens.iter().enumerate() {
                let start_char_idx = token_idx_to_start_display_char_idx[idx];
                let end_char_idx = token_idx_to_end_display_char_idx[idx];

                for tag in self.doc.token_tags(token.index) {
                    f.write_char('\n')?;
                    for _ in 0..start_char_idx {
                        f.write_char(' ')?;
                    }

                    f.write_char('╰')?;
                    for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                        f.write_char('─')?;
                    }
                    if end_char_idx - start_char_idx > 1 {
                        f.write_char('╯')?;
                    }

                    write!(f, "{}({:?})", tag.tagset(), tag.value())?;
                    if self.show_language {
                        if let Some(language) = tag.language() {
                            write!(f, " @{}", language)?;
                        }
                    }
                    if self.show_component {
                        if let Some(component_id) = tag.component_id() {
                            write!(f, " by {}", component_id)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl<'a> DocumentDisplay<'a> {
    pub fn new(doc: &'a Document) -> Self {
        DocumentDisplay {
            doc,
            show_language: false,
            show_component: false,
        }
    }

    /// Append ` @<language>` to tags that carry one.
    pub fn with_language(mut self) -> Self {
        self.show_language = true;
        self
    }

    /// Append ` by <component id>` to tags that carry one.
    pub fn with_component(mut self) -> Self {
        self.show_component = true;
        self
    }
}
