//! TOML configuration for the question-answering service.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup against the bundled lexicon and the sample knowledge base.
//!
//! ```toml
//! [knowledge_base]
//! path = "geoproperties_uk.ttl.gz"
//! format = "turtle"
//! query_timeout_ms = 2000
//!
//! [morphology]
//! lexicon = "data/lexicon_uk.json"
//!
//! [[patterns]]
//! trigger = "яка протяжність"
//! properties = ["length", "довжина"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, QaResult};
use crate::qa::patterns::{PropertyDirective, TriggerPattern};

/// RDF serialization of the knowledge-base file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KbFormat {
    #[default]
    Turtle,
    NTriples,
    RdfXml,
}

impl std::fmt::Display for KbFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Turtle => write!(f, "Turtle"),
            Self::NTriples => write!(f, "N-Triples"),
            Self::RdfXml => write!(f, "RDF/XML"),
        }
    }
}

/// Where the knowledge graph lives and how identifiers map into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Graph file; a `.gz` suffix means gzip-compressed.
    #[serde(default = "default_kb_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: KbFormat,
    /// Namespace prepended to entity identifiers and stripped from values.
    #[serde(default = "default_resource_namespace")]
    pub resource_namespace: String,
    /// Namespace prepended to property identifiers.
    #[serde(default = "default_property_namespace")]
    pub property_namespace: String,
    /// Upper bound on a single knowledge-base lookup.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_kb_path() -> PathBuf {
    PathBuf::from("data/geo_sample.ttl")
}
fn default_resource_namespace() -> String {
    "http://uk.dbpedia.org/resource/".into()
}
fn default_property_namespace() -> String {
    "http://uk.dbpedia.org/property/".into()
}
fn default_query_timeout_ms() -> u64 {
    2_000
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            path: default_kb_path(),
            format: KbFormat::default(),
            resource_namespace: default_resource_namespace(),
            property_namespace: default_property_namespace(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl KnowledgeBaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Whether the file is gzip-compressed, judged by its extension.
    pub fn is_compressed(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    }
}

/// Morphological analyzer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphologyConfig {
    /// JSON lexicon; `None` uses the bundled one.
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

/// An extra trigger pattern declared in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub trigger: String,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub coordinates: bool,
}

impl PatternConfig {
    /// Validate and convert into a table record.
    pub fn to_pattern(&self) -> Result<TriggerPattern, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidPattern {
            trigger: self.trigger.clone(),
            message: message.into(),
        };
        if self.trigger.trim().is_empty() {
            return Err(invalid("trigger is empty"));
        }
        let directive = match (self.coordinates, self.properties.is_empty()) {
            (true, true) => PropertyDirective::Coordinates,
            (false, false) => PropertyDirective::Properties(self.properties.clone()),
            (true, false) => return Err(invalid("both coordinates and properties are set")),
            (false, true) => return Err(invalid("no properties given")),
        };
        Ok(TriggerPattern::new(&self.trigger, directive))
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaConfig {
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub morphology: MorphologyConfig,
    /// Appended to the built-in trigger table.
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

impl QaConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> QaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.extra_patterns()?;
        Ok(config)
    }

    /// The config file's patterns as table records.
    pub fn extra_patterns(&self) -> Result<Vec<TriggerPattern>, ConfigError> {
        self.patterns.iter().map(PatternConfig::to_pattern).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: QaConfig = toml::from_str("").unwrap();
        assert_eq!(config.knowledge_base.format, KbFormat::Turtle);
        assert_eq!(config.knowledge_base.query_timeout_ms, 2_000);
        assert_eq!(
            config.knowledge_base.resource_namespace,
            "http://uk.dbpedia.org/resource/"
        );
        assert!(config.morphology.lexicon.is_none());
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn full_file_parses() {
        let config: QaConfig = toml::from_str(
            r#"
            [knowledge_base]
            path = "kb/geoproperties_uk.ttl.gz"
            format = "ntriples"
            query_timeout_ms = 500

            [morphology]
            lexicon = "lex.json"

            [[patterns]]
            trigger = "яка протяжність"
            properties = ["length"]

            [[patterns]]
            trigger = "де лежить"
            coordinates = true
            "#,
        )
        .unwrap();
        assert_eq!(config.knowledge_base.format, KbFormat::NTriples);
        assert!(config.knowledge_base.is_compressed());
        assert_eq!(config.knowledge_base.query_timeout(), Duration::from_millis(500));
        assert_eq!(config.morphology.lexicon, Some(PathBuf::from("lex.json")));

        let patterns = config.extra_patterns().unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(
            patterns[0].directive,
            PropertyDirective::Properties(vec!["length".into()])
        );
        assert_eq!(patterns[1].directive, PropertyDirective::Coordinates);
    }

    #[test]
    fn pattern_needs_exactly_one_target() {
        let both = PatternConfig {
            trigger: "x".into(),
            properties: vec!["a".into()],
            coordinates: true,
        };
        assert!(both.to_pattern().is_err());

        let neither = PatternConfig {
            trigger: "x".into(),
            properties: vec![],
            coordinates: false,
        };
        assert!(neither.to_pattern().is_err());

        let blank = PatternConfig {
            trigger: "  ".into(),
            properties: vec!["a".into()],
            coordinates: false,
        };
        assert!(blank.to_pattern().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = QaConfig::load(Path::new("/nonexistent/qa.toml")).unwrap_err();
        assert!(matches!(err, crate::error::QaError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn load_rejects_invalid_pattern() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("qa.toml");
        std::fs::write(&path, "[[patterns]]\ntrigger = \"x\"\n").unwrap();
        let err = QaConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::QaError::Config(ConfigError::InvalidPattern { .. })
        ));
    }
}
