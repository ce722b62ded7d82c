use crate::*;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn fixture_annotator() -> PosTagAnnotator {
    let config = AnnotatorConfig::from_toml_file(&fixture("annotator.toml"))
        .expect("Failed to load fixture config");
    PosTagAnnotator::initialize(&config).expect("Failed to initialize annotator")
}

/// One sentence over the whole text, with "hm" already attached to "A".
fn prethcamide_doc() -> Document {
    let text = "A study on the Prethcamide";
    let mut doc = Document::new(text);
    doc.add_sentence(0, text.len());
    let first = doc.add_token(0, 1);
    doc.add_token(2, 7);
    doc.add_token(8, 10);
    doc.add_token(11, 14);
    doc.add_token(15, 26);

    let hm = doc.register_tag(Box::new(PennBioIEPOSTag::new(Span::new(0, 1), "hm")));
    doc.attach_tag(first, hm);
    doc
}

fn tag_values(doc: &Document, token: usize) -> Vec<String> {
    doc.token_tags(token)
        .map(|tag| tag.value().to_string())
        .collect()
}

#[test]
fn test_prethcamide_first_tags() {
    let annotator = fixture_annotator();
    let mut doc = prethcamide_doc();
    let report = annotator.process(&mut doc);

    assert!(!report.has_issues());
    assert_eq!(report.tags_attached, 5);

    let predicted: String = (0..doc.tokens().len())
        .map(|idx| {
            let first = doc.token_tags(idx).next().expect("token has no tag");
            assert!(first.is::<PennBioIEPOSTag>());
            format!("{};", first.value())
        })
        .collect();
    assert_eq!(predicted, "hm;NN;IN;DT;NN;");
}

#[test]
fn test_prethcamide_display() {
    let annotator = fixture_annotator();
    let mut doc = prethcamide_doc();
    annotator.process(&mut doc);

    insta::assert_snapshot!(DocumentDisplay::new(&doc).with_language(), @r###"
    A  study  on  the  Prethcamide
    ╰PennBioIEPOSTag("hm")
    ╰PennBioIEPOSTag("DT") @en
       ╰───╯PennBioIEPOSTag("NN") @en
              ╰╯PennBioIEPOSTag("IN") @en
                  ╰─╯PennBioIEPOSTag("DT") @en
                       ╰─────────╯PennBioIEPOSTag("NN") @en
    "###);
}

#[test]
fn test_new_tags_carry_configuration() {
    let annotator = fixture_annotator();
    assert_eq!(annotator.tagset(), "de.julielab.jules.types.PennBioIEPOSTag");
    assert_eq!(annotator.language(), Some("en"));

    let mut doc = prethcamide_doc();
    annotator.process(&mut doc);

    let created: Vec<&dyn PosTagAny> = doc
        .tags()
        .map(|(_, tag)| tag)
        .filter(|tag| tag.component_id().is_some())
        .collect();
    assert_eq!(created.len(), 5);
    for tag in created {
        assert_eq!(tag.component_id(), Some(COMPONENT_ID));
        assert_eq!(tag.language(), Some("en"));
        assert!(tag.downcast_ref::<PennBioIEPOSTag>().is_some());
    }
}

#[test]
fn test_rerun_appends_after_existing_tags() {
    let annotator = fixture_annotator();
    let mut doc = prethcamide_doc();
    annotator.process(&mut doc);
    let before: Vec<Vec<String>> = (0..5).map(|idx| tag_values(&doc, idx)).collect();

    annotator.process(&mut doc);

    for (idx, previous) in before.iter().enumerate() {
        let after = tag_values(&doc, idx);
        assert_eq!(after.len(), previous.len() + 1);
        assert_eq!(&after[..previous.len()], &previous[..]);
    }
    assert_eq!(tag_values(&doc, 0), vec!["hm", "DT", "DT"]);
}

#[test]
fn test_tag_spans_match_tokens() {
    let annotator = fixture_annotator();
    let mut doc = prethcamide_doc();
    annotator.process(&mut doc);

    for (idx, token) in doc.tokens().iter().enumerate() {
        for tag in doc.token_tags(idx) {
            assert_eq!(tag.span(), token.span);
        }
    }
}

#[test]
fn test_annotator_is_reused_across_documents() {
    let annotator = fixture_annotator();

    let mut first = Document::new("The hydrolysis was slow.");
    first.add_sentence(0, 24);
    for (begin, end) in [(0, 3), (4, 14), (15, 18), (19, 23), (23, 24)] {
        first.add_token(begin, end);
    }
    let mut second = Document::new("Hydrolysis of 12 esters");
    second.add_sentence(0, 23);
    for (begin, end) in [(0, 10), (11, 13), (14, 16), (17, 23)] {
        second.add_token(begin, end);
    }

    annotator.process(&mut first);
    annotator.process(&mut second);

    let first_tags: Vec<String> = (0..5).flat_map(|idx| tag_values(&first, idx)).collect();
    assert_eq!(first_tags, vec!["DT", "NN", "VBD", "NN", "."]);
    // "Hydrolysis" matches the dictionary case-insensitively, overriding the NNS suffix rule
    let second_tags: Vec<String> = (0..4).flat_map(|idx| tag_values(&second, idx)).collect();
    assert_eq!(second_tags, vec!["NN", "IN", "CD", "NNS"]);
}

#[test]
fn test_without_dictionary_suffix_rule_applies() {
    let config = AnnotatorConfig::new(fixture("english.ron"));
    let annotator = PosTagAnnotator::initialize(&config).unwrap();
    assert_eq!(annotator.tagger().tag(&["Hydrolysis"]), vec!["NNS"]);
}

#[test]
fn test_case_sensitive_dictionary_misses_capitalized_word() {
    let config =
        AnnotatorConfig::new(fixture("english.ron")).with_tag_dict(fixture("english.tagdict"), true);
    let annotator = PosTagAnnotator::initialize(&config).unwrap();
    assert_eq!(
        annotator.tagger().tag(&["Hydrolysis", "hydrolysis"]),
        vec!["NNS", "NN"]
    );
}

#[test]
fn test_missing_model_fails_initialization() {
    let config = AnnotatorConfig::new(fixture("absent.ron"));
    let err = PosTagAnnotator::initialize(&config).unwrap_err();
    assert!(matches!(err, InitError::Io { .. }));
}

#[test]
fn test_missing_tag_dict_file_fails_initialization() {
    let config = AnnotatorConfig::from_toml_file(&fixture("missing-dict.toml")).unwrap();
    let err = PosTagAnnotator::initialize(&config).unwrap_err();
    match err {
        InitError::Io { path, .. } => assert_eq!(path, fixture("absent.tagdict")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_tag_dict_enabled_without_path_fails_initialization() {
    let mut config = AnnotatorConfig::new(fixture("english.ron"));
    config.use_tag_dict = true;
    let err = PosTagAnnotator::initialize(&config).unwrap_err();
    assert!(matches!(err, InitError::MissingTagDict));
}

#[test]
fn test_broken_model_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("broken.ron");
    std::fs::write(&model, "(default_tag: \"NN\", lexicon: {").unwrap();

    let err = PosTagAnnotator::initialize(&AnnotatorConfig::new(&model)).unwrap_err();
    assert!(matches!(err, InitError::ModelParse { .. }));
    assert!(err.to_string().starts_with("failed to parse model"));
}

/// A tag set without a language field.
#[derive(Debug)]
struct ChunkTag {
    span: Span,
    value: String,
}

impl PosTag for ChunkTag {
    fn tagset(&self) -> &'static str {
        "ChunkTag"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn component_id(&self) -> Option<&str> {
        None
    }
}

fn build_chunk_tag(init: &TagInit) -> Result<Box<dyn PosTagAny>, TagBuildError> {
    if init.value == "DT" {
        return Err(TagBuildError::Construction {
            tagset: "ChunkTag".to_string(),
            reason: "determiners are not chunk heads".to_string(),
        });
    }
    Ok(Box::new(ChunkTag {
        span: init.span,
        value: init.value.clone(),
    }))
}

#[test]
fn test_registered_tagset_and_per_tag_failures() {
    let mut registry = TagSetRegistry::with_builtin();
    registry.register("ChunkTag", build_chunk_tag);
    let config = AnnotatorConfig::new(fixture("english.ron"))
        .with_tagset("ChunkTag")
        .with_language("en");
    let annotator = PosTagAnnotator::initialize_with_registry(&config, registry).unwrap();

    let mut doc = prethcamide_doc();
    let report = annotator.process(&mut doc);

    // "A" and "the" are determiners and get skipped; the rest still get tagged
    assert_eq!(report.tags_attached, 3);
    let skipped: Vec<Span> = report
        .issues
        .iter()
        .map(|issue| match issue {
            ProcessIssue::TagSkipped { token, .. } => *token,
            other => panic!("unexpected issue: {}", other),
        })
        .collect();
    assert_eq!(skipped, vec![Span::new(0, 1), Span::new(11, 14)]);

    assert_eq!(tag_values(&doc, 0), vec!["hm"]);
    let study: Vec<&dyn PosTagAny> = doc.token_tags(1).collect();
    assert!(study[0].is::<ChunkTag>());
    assert_eq!(study[0].language(), None);

    insta::assert_snapshot!(DocumentDisplay::new(&doc), @r###"
    A  study  on  the  Prethcamide
    ╰PennBioIEPOSTag("hm")
       ╰───╯ChunkTag("NN")
              ╰╯ChunkTag("IN")
                       ╰─────────╯ChunkTag("NN")
    "###);
}
