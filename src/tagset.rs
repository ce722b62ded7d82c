//! String-keyed tag set registry.

use std::collections::HashMap;

use crate::tag::{GeniaPOSTag, PennBioIEPOSTag, PennPOSTag, PosTagAny, TagInit};
use crate::TagBuildError;

/// Builds one tag of a particular tag set.
pub type TagFactory = fn(&TagInit) -> Result<Box<dyn PosTagAny>, TagBuildError>;

/// Maps tag set identifiers to factories.
///
/// New tag sets are added with [`register`](Self::register); the annotator
/// only ever refers to them by name.
#[derive(Clone, Default)]
pub struct TagSetRegistry {
    factories: HashMap<String, TagFactory>,
}

impl std::fmt::Debug for TagSetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSetRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl TagSetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the Penn, Genia and PennBioIE tag sets.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PennPOSTag::TAGSET, PennPOSTag::build);
        registry.register(GeniaPOSTag::TAGSET, GeniaPOSTag::build);
        registry.register(PennBioIEPOSTag::TAGSET, PennBioIEPOSTag::build);
        registry
    }

    /// Register a factory, replacing any previous one under the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: TagFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up the factory for `name`.
    ///
    /// Qualified names such as `de.julielab.jules.types.PennPOSTag` or
    /// `types::PennPOSTag` fall back to their last segment when the full name
    /// is not registered.
    pub fn resolve(&self, name: &str) -> Result<TagFactory, TagBuildError> {
        if let Some(factory) = self.factories.get(name) {
            return Ok(*factory);
        }
        let short = name.rsplit(&['.', ':'][..]).next().unwrap_or(name);
        self.factories
            .get(short)
            .copied()
            .ok_or_else(|| TagBuildError::UnknownTagSet {
                name: name.to_string(),
            })
    }

    /// Build a tag of the tag set registered under `name`.
    pub fn build(&self, name: &str, init: &TagInit) -> Result<Box<dyn PosTagAny>, TagBuildError> {
        let factory = self.resolve(name)?;
        factory(init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PosTag, Span};

    #[derive(Debug)]
    struct UniversalTag {
        span: Span,
        value: String,
    }

    impl PosTag for UniversalTag {
        fn tagset(&self) -> &'static str {
            "UniversalTag"
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

    fn build_universal(init: &TagInit) -> Result<Box<dyn PosTagAny>, TagBuildError> {
        Ok(Box::new(UniversalTag {
            span: init.span,
            value: init.value.to_uppercase(),
        }))
    }

    fn init() -> TagInit {
        TagInit {
            span: Span::new(0, 4),
            value: "noun".to_string(),
            component_id: "test".to_string(),
            language: None,
        }
    }

    #[test]
    fn builtin_names() {
        let registry = TagSetRegistry::with_builtin();
        assert_eq!(
            registry.names(),
            vec!["GeniaPOSTag", "PennBioIEPOSTag", "PennPOSTag"]
        );
    }

    #[test]
    fn qualified_names_resolve_by_last_segment() {
        let registry = TagSetRegistry::with_builtin();
        assert!(registry.contains("de.julielab.jules.types.PennBioIEPOSTag"));
        assert!(registry.contains("types::GeniaPOSTag"));
        assert!(!registry.contains("types::BrownPOSTag"));

        let tag = registry
            .build("de.julielab.jules.types.PennBioIEPOSTag", &init())
            .unwrap();
        assert!(tag.is::<PennBioIEPOSTag>());
    }

    #[test]
    fn unknown_tagset() {
        let registry = TagSetRegistry::with_builtin();
        let err = registry.build("BrownPOSTag", &init()).unwrap_err();
        assert_eq!(
            err,
            TagBuildError::UnknownTagSet {
                name: "BrownPOSTag".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown tag set 'BrownPOSTag'");
    }

    #[test]
    fn user_registered_tagset() {
        let mut registry = TagSetRegistry::with_builtin();
        registry.register("UniversalTag", build_universal);

        let tag = registry.build("UniversalTag", &init()).unwrap();
        assert_eq!(tag.tagset(), "UniversalTag");
        assert_eq!(tag.value(), "NOUN");
        assert_eq!(tag.language(), None);
        assert!(tag.downcast_ref::<UniversalTag>().is_some());
    }
}
