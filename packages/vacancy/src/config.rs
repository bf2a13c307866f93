//! Configuration constants and builder options.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default XML namespace of the `Envelope` element.
pub const DEFAULT_XMLNS: &str = "http://arbetsformedlingen.se/LedigtArbete";

/// Schema generation this crate targets.
pub const SCHEMA_VERSION: &str = "0.52";

/// Default indentation for rendered XML.
pub const DEFAULT_INDENT: &str = "  ";

/// Base URL of the Ledigt Arbete API.
pub const API_BASE_URL: &str = "http://api.arbetsformedlingen.se/ledigtarbete";

/// Submission endpoint for published postings.
pub const PRODUCTION_ENDPOINT: &str =
    "http://api.arbetsformedlingen.se/ledigtarbete/apiledigtarbete/hrxml";

/// Submission endpoint for test postings. Nothing sent here is published.
pub const TEST_ENDPOINT: &str =
    "http://api.arbetsformedlingen.se/ledigtarbete/apiledigtarbete/test/hrxml";

/// Content type expected by both endpoints.
pub const SUBMISSION_CONTENT_TYPE: &str = "text/xml";

/// Municipality code for a workplace somewhere in Sweden, location unspecified.
pub const MUNICIPALITY_UNSPECIFIED: &str = "9090";

/// Municipality code for a workplace outside Sweden.
pub const MUNICIPALITY_ABROAD: &str = "9999";

/// Which API endpoint a finished document is meant for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    /// Endpoint URL for this environment.
    #[must_use]
    pub fn submission_url(&self) -> &'static str {
        match self {
            Self::Test => TEST_ENDPOINT,
            Self::Production => PRODUCTION_ENDPOINT,
        }
    }
}

/// Options for a [`VacancyBuilder`](crate::VacancyBuilder).
///
/// # Examples
/// ```
/// use platsbanken_vacancy::BuilderConfig;
///
/// let config = BuilderConfig::from_yaml_str("indent: \"\\t\"\n").unwrap();
/// assert_eq!(config.indent, "\t");
/// assert_eq!(config.version, "0.52");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Namespace written on `Envelope`.
    pub xmlns: String,
    /// Schema version written on `Envelope`.
    pub version: String,
    /// Indentation per nesting level in rendered XML. Empty for one line.
    pub indent: String,
    /// Target endpoint. Informational; the builder never sends anything.
    pub environment: Environment,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            xmlns: DEFAULT_XMLNS.to_string(),
            version: SCHEMA_VERSION.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            environment: Environment::default(),
        }
    }
}

impl BuilderConfig {
    /// Parse options from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        tracing::debug!(
            xmlns = %config.xmlns,
            version = %config.version,
            environment = ?config.environment,
            "Loaded builder configuration"
        );
        Ok(config)
    }

    /// Use `indent` when rendering.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Target `environment`.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}
