//! Part-of-speech tag types.
//!
//! Every tag set shares the [`PosTag`] capability set. Concrete variants are
//! ordinary structs; the annotator never names them directly and instead
//! builds them through a [`TagSetRegistry`](crate::TagSetRegistry).

use std::any::{Any, TypeId};
use std::fmt::Debug;

use crate::{Span, TagBuildError};

/// A part-of-speech tag attached to a token.
///
/// # Example
///
/// ```
/// use layered_pos_annotator::{PosTag, Span};
///
/// #[derive(Debug)]
/// pub struct UniversalTag {
///     span: Span,
///     value: String,
/// }
///
/// impl PosTag for UniversalTag {
///     fn tagset(&self) -> &'static str { "UniversalTag" }
///     fn span(&self) -> Span { self.span }
///     fn value(&self) -> &str { &self.value }
///     fn component_id(&self) -> Option<&str> { None }
/// }
/// ```
pub trait PosTag: Debug + Send + Sync + 'static {
    /// Name of the tag set this tag belongs to.
    fn tagset(&self) -> &'static str;

    fn span(&self) -> Span;

    /// The tag string, e.g. `"NN"`.
    fn value(&self) -> &str;

    /// Identifier of the component that produced this tag.
    fn component_id(&self) -> Option<&str>;

    /// Language of the tagged text, for variants that record one.
    fn language(&self) -> Option<&str> {
        None
    }

    fn begin(&self) -> usize {
        self.span().begin
    }

    fn end(&self) -> usize {
        self.span().end
    }
}

/// Object-safe extension of [`PosTag`] for type-erased storage.
///
/// This trait is automatically implemented for all types implementing [`PosTag`].
pub trait PosTagAny: PosTag + 'static {
    fn as_any(&self) -> &dyn Any;

    /// Returns the concrete TypeId of the tag.
    fn tag_type_id(&self) -> TypeId;
}

impl<T: PosTag> PosTagAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn tag_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }
}

impl dyn PosTagAny {
    /// Returns true if the erased tag is a `T`.
    pub fn is<T: PosTag>(&self) -> bool {
        self.tag_type_id() == TypeId::of::<T>()
    }

    pub fn downcast_ref<T: PosTag>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Everything a tag set factory receives to build one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInit {
    pub span: Span,
    pub value: String,
    pub component_id: String,
    /// Configured language; variants without a language field ignore it.
    pub language: Option<String>,
}

/// Fields shared by the built-in tag sets.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagFields {
    span: Span,
    value: String,
    component_id: Option<String>,
    language: Option<String>,
}

impl TagFields {
    fn from_init(init: &TagInit) -> Result<Self, TagBuildError> {
        if init.span.begin > init.span.end {
            return Err(TagBuildError::Construction {
                tagset: String::new(),
                reason: format!("inverted span {}", init.span),
            });
        }
        Ok(Self {
            span: init.span,
            value: init.value.clone(),
            component_id: Some(init.component_id.clone()),
            language: init.language.clone(),
        })
    }
}

macro_rules! builtin_tagset {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            fields: TagFields,
        }

        impl $name {
            pub const TAGSET: &'static str = stringify!($name);

            /// Create a tag with no provenance or language.
            pub fn new(span: Span, value: impl Into<String>) -> Self {
                Self {
                    fields: TagFields {
                        span,
                        value: value.into(),
                        component_id: None,
                        language: None,
                    },
                }
            }

            pub fn with_component_id(mut self, component_id: impl Into<String>) -> Self {
                self.fields.component_id = Some(component_id.into());
                self
            }

            pub fn with_language(mut self, language: impl Into<String>) -> Self {
                self.fields.language = Some(language.into());
                self
            }

            /// Registry factory for this tag set.
            pub fn build(init: &TagInit) -> Result<Box<dyn PosTagAny>, TagBuildError> {
                let fields = TagFields::from_init(init).map_err(|err| match err {
                    TagBuildError::Construction { reason, .. } => TagBuildError::Construction {
                        tagset: Self::TAGSET.to_string(),
                        reason,
                    },
                    other => other,
                })?;
                Ok(Box::new(Self { fields }))
            }
        }

        impl PosTag for $name {
            fn tagset(&self) -> &'static str {
                Self::TAGSET
            }

            fn span(&self) -> Span {
                self.fields.span
            }

            fn value(&self) -> &str {
                &self.fields.value
            }

            fn component_id(&self) -> Option<&str> {
                self.fields.component_id.as_deref()
            }

            fn language(&self) -> Option<&str> {
                self.fields.language.as_deref()
            }
        }
    };
}

builtin_tagset!(
    /// Penn Treebank tag set (`NN`, `VBZ`, `IN`, ...).
    PennPOSTag
);

builtin_tagset!(
    /// GENIA corpus tag set, Penn-derived with biomedical conventions.
    GeniaPOSTag
);

builtin_tagset!(
    /// PennBioIE tag set used for biomedical abstracts.
    PennBioIEPOSTag
);
