//! The POS tag annotator.
//!
//! [`PosTagAnnotator::initialize`] loads the model once; [`PosTagAnnotator::process`]
//! then tags one document at a time, sentence by sentence, appending one tag per
//! token. Only initialization can fail. Problems met while processing are
//! logged, collected in the returned [`AnnotationReport`], and skipped.

use tracing::{debug, info, warn};

use crate::extractor::{sentence_tokens, SentenceTokens};
use crate::tagger::{CasePolicy, DictionaryTagger, LexiconModel, SentenceTags, TagDictionary, Tagger};
use crate::{
    AnnotatorConfig, Document, InitResult, PennPOSTag, PosTag, PosTagAny, ProcessIssue, Span,
    TagBuildError, TagInit, TagSetRegistry,
};

/// Provenance stamped on every tag this annotator creates.
pub const COMPONENT_ID: &str = "layered_pos_annotator::PosTagAnnotator";

/// Outcome of processing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    /// Sentences visited, including empty ones.
    pub sentences: usize,
    pub tags_attached: usize,
    /// Everything that was skipped, in the order it happened.
    pub issues: Vec<ProcessIssue>,
}

impl AnnotationReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Token positions of one sentence together with the tagger's answer.
struct TaggedSentence {
    span: Span,
    tokens: Vec<(usize, Span)>,
    tags: SentenceTags,
}

pub struct PosTagAnnotator {
    tagger: Box<dyn Tagger>,
    registry: TagSetRegistry,
    tagset: String,
    language: Option<String>,
}

impl std::fmt::Debug for PosTagAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosTagAnnotator")
            .field("registry", &self.registry)
            .field("tagset", &self.tagset)
            .field("language", &self.language)
            .finish()
    }
}

impl PosTagAnnotator {
    /// Load the configured model (and tag dictionary) with the built-in tag sets.
    pub fn initialize(config: &AnnotatorConfig) -> InitResult<Self> {
        Self::initialize_with_registry(config, TagSetRegistry::with_builtin())
    }

    /// Load the configured model, building tags from `registry`.
    pub fn initialize_with_registry(
        config: &AnnotatorConfig,
        registry: TagSetRegistry,
    ) -> InitResult<Self> {
        info!(
            component = COMPONENT_ID,
            model = %config.model_file.display(),
            tagset = %config.tagset,
            "initializing POS tag annotator"
        );

        let dict_path = config.tag_dict_path()?;
        let model = LexiconModel::load(&config.model_file)?;
        info!(
            component = COMPONENT_ID,
            entries = model.lexicon.len(),
            "loaded POS model"
        );

        let mut tagger = DictionaryTagger::new(model);
        if let Some(path) = dict_path {
            let policy = CasePolicy::from_case_sensitive(config.case_sensitive);
            let dictionary = TagDictionary::load(path, policy)?;
            info!(
                component = COMPONENT_ID,
                path = %path.display(),
                entries = dictionary.len(),
                case_sensitive = config.case_sensitive,
                "loaded tag dictionary"
            );
            tagger = tagger.with_dictionary(dictionary);
        }

        let mut annotator = Self::with_tagger(tagger)
            .with_registry(registry)
            .with_tagset(config.tagset.clone());
        annotator.language = config.language.clone();

        if !annotator.registry.contains(&annotator.tagset) {
            // Each tag is skipped and reported while processing.
            warn!(
                component = COMPONENT_ID,
                tagset = %annotator.tagset,
                "configured tag set is not registered"
            );
        }
        info!(component = COMPONENT_ID, "POS tag annotator ready");
        Ok(annotator)
    }

    /// Wrap an already loaded tagger. Tags default to [`PennPOSTag`] with no language.
    pub fn with_tagger(tagger: impl Tagger + 'static) -> Self {
        Self {
            tagger: Box::new(tagger),
            registry: TagSetRegistry::with_builtin(),
            tagset: PennPOSTag::TAGSET.to_string(),
            language: None,
        }
    }

    pub fn with_registry(mut self, registry: TagSetRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_tagset(mut self, tagset: impl Into<String>) -> Self {
        self.tagset = tagset.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    pub fn registry(&self) -> &TagSetRegistry {
        &self.registry
    }

    /// Register further tag sets after initialization.
    pub fn registry_mut(&mut self) -> &mut TagSetRegistry {
        &mut self.registry
    }

    pub fn tagset(&self) -> &str {
        &self.tagset
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Tag every sentence of `doc`, appending one tag to each token.
    pub fn process(&self, doc: &mut Document) -> AnnotationReport {
        info!(
            component = COMPONENT_ID,
            sentences = doc.sentences().len(),
            tokens = doc.tokens().len(),
            "processing document"
        );

        let tagged: Vec<TaggedSentence> = sentence_tokens(doc)
            .map(|group| self.tag_sentence(&group))
            .collect();

        let mut report = AnnotationReport::default();
        for sentence in tagged {
            self.write_sentence(doc, sentence, &mut report);
        }

        debug!(
            component = COMPONENT_ID,
            tags_attached = report.tags_attached,
            issues = report.issues.len(),
            "document done"
        );
        report
    }

    fn tag_sentence(&self, group: &SentenceTokens<'_>) -> TaggedSentence {
        let texts = group.texts();
        let output = self.tagger.tag(&texts);
        if output.len() > texts.len() {
            debug!(
                component = COMPONENT_ID,
                sentence = %group.sentence.span,
                surplus = output.len() - texts.len(),
                "ignoring surplus tags"
            );
        }
        TaggedSentence {
            span: group.sentence.span,
            tokens: group
                .tokens
                .iter()
                .map(|token| (token.index, token.span))
                .collect(),
            tags: SentenceTags::align(texts.len(), output),
        }
    }

    fn write_sentence(
        &self,
        doc: &mut Document,
        sentence: TaggedSentence,
        report: &mut AnnotationReport,
    ) {
        report.sentences += 1;

        if let SentenceTags::Short { tags, expected } = &sentence.tags {
            warn!(
                component = COMPONENT_ID,
                sentence = %sentence.span,
                expected = *expected,
                returned = tags.len(),
                "POS tagger returned fewer tags than tokens, tagging prefix only"
            );
            report.issues.push(ProcessIssue::ShortTaggerOutput {
                sentence: sentence.span,
                expected: *expected,
                returned: tags.len(),
            });
        }

        for (&(token, span), value) in sentence.tokens.iter().zip(sentence.tags.tags()) {
            match self.build_tag(span, value) {
                Ok(tag) => {
                    let id = doc.register_tag(tag);
                    let attached = doc.attach_tag(token, id);
                    debug_assert!(attached, "token {} came from this document", token);
                    if attached {
                        report.tags_attached += 1;
                    }
                }
                Err(error) => {
                    warn!(
                        component = COMPONENT_ID,
                        token = %span,
                        error = %error,
                        "skipping POS tag"
                    );
                    report
                        .issues
                        .push(ProcessIssue::TagSkipped { token: span, error });
                }
            }
        }
    }

    fn build_tag(&self, span: Span, value: &str) -> Result<Box<dyn PosTagAny>, TagBuildError> {
        let init = TagInit {
            span,
            value: value.to_string(),
            component_id: COMPONENT_ID.to_string(),
            language: self.language.clone(),
        };
        let tag = self.registry.build(&self.tagset, &init)?;
        if tag.span() != span {
            return Err(TagBuildError::Construction {
                tagset: self.tagset.clone(),
                reason: format!("built span {} differs from token span {}", tag.span(), span),
            });
        }
        Ok(tag)
    }
}
