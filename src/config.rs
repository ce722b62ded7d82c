//! Annotator configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{InitError, InitResult, PennPOSTag};

/// Startup configuration for [`PosTagAnnotator`](crate::PosTagAnnotator).
///
/// Keys use the same names on disk as in pipeline descriptors:
///
/// ```toml
/// modelFile = "models/english.ron"
/// tagset = "PennBioIEPOSTag"
/// language = "en"
/// useTagDict = true
/// tagDict = "models/english.tagdict"
/// caseSensitive = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotatorConfig {
    pub model_file: PathBuf,
    #[serde(default = "default_tagset")]
    pub tagset: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub use_tag_dict: bool,
    #[serde(default)]
    pub tag_dict: Option<PathBuf>,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

fn default_tagset() -> String {
    PennPOSTag::TAGSET.to_string()
}

fn default_case_sensitive() -> bool {
    true
}

impl AnnotatorConfig {
    /// Configuration for `model_file` with every other setting at its default.
    pub fn new(model_file: impl Into<PathBuf>) -> Self {
        Self {
            model_file: model_file.into(),
            tagset: default_tagset(),
            language: None,
            use_tag_dict: false,
            tag_dict: None,
            case_sensitive: default_case_sensitive(),
        }
    }

    pub fn with_tagset(mut self, tagset: impl Into<String>) -> Self {
        self.tagset = tagset.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Enable the tag dictionary at `path`.
    pub fn with_tag_dict(mut self, path: impl Into<PathBuf>, case_sensitive: bool) -> Self {
        self.use_tag_dict = true;
        self.tag_dict = Some(path.into());
        self.case_sensitive = case_sensitive;
        self
    }

    /// Parse configuration text. Paths are kept as written.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file.
    ///
    /// Relative `modelFile` and `tagDict` paths are resolved against the
    /// directory holding the configuration file.
    pub fn from_toml_file(path: &Path) -> InitResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| InitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|e| InitError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(base) = path.parent() {
            config.model_file = base.join(&config.model_file);
            config.tag_dict = config.tag_dict.map(|dict| base.join(dict));
        }
        Ok(config)
    }

    /// The tag dictionary path, if the dictionary is enabled.
    pub fn tag_dict_path(&self) -> InitResult<Option<&Path>> {
        if !self.use_tag_dict {
            return Ok(None);
        }
        self.tag_dict
            .as_deref()
            .map(Some)
            .ok_or(InitError::MissingTagDict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnnotatorConfig::from_toml_str(r#"modelFile = "model.ron""#).unwrap();
        assert_eq!(config, AnnotatorConfig::new("model.ron"));
        assert_eq!(config.tagset, "PennPOSTag");
        assert!(config.case_sensitive);
        assert_eq!(config.tag_dict_path().unwrap(), None);
    }

    #[test]
    fn all_keys() {
        let config = AnnotatorConfig::from_toml_str(
            r#"
            modelFile = "model.ron"
            tagset = "de.julielab.jules.types.GeniaPOSTag"
            language = "en"
            useTagDict = true
            tagDict = "tags.dict"
            caseSensitive = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            AnnotatorConfig::new("model.ron")
                .with_tagset("de.julielab.jules.types.GeniaPOSTag")
                .with_language("en")
                .with_tag_dict("tags.dict", false)
        );
        assert_eq!(config.tag_dict_path().unwrap(), Some(Path::new("tags.dict")));
    }

    #[test]
    fn missing_model_file_key() {
        assert!(AnnotatorConfig::from_toml_str(r#"tagset = "PennPOSTag""#).is_err());
    }

    #[test]
    fn unknown_key() {
        assert!(AnnotatorConfig::from_toml_str("modelFile = \"m\"\nmodel = \"m\"").is_err());
    }

    #[test]
    fn tag_dict_enabled_without_path() {
        let mut config = AnnotatorConfig::new("model.ron");
        config.use_tag_dict = true;
        assert!(matches!(
            config.tag_dict_path(),
            Err(InitError::MissingTagDict)
        ));
    }

    #[test]
    fn file_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotator.toml");
        fs::write(
            &path,
            "modelFile = \"models/m.ron\"\nuseTagDict = true\ntagDict = \"/abs/tags.dict\"\n",
        )
        .unwrap();

        let config = AnnotatorConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.model_file, dir.path().join("models/m.ron"));
        // absolute paths are left alone by Path::join
        assert_eq!(config.tag_dict, Some(PathBuf::from("/abs/tags.dict")));
    }

    #[test]
    fn unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotator.toml");
        fs::write(&path, "modelFile = ").unwrap();
        assert!(matches!(
            AnnotatorConfig::from_toml_file(&path),
            Err(InitError::Config { .. })
        ));
    }
}
