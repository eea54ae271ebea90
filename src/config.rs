//! Component configuration and serialisation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::CasingPolicy;
use crate::pipeline::DEFAULT_BATCH_SIZE;
use crate::resolver::ModelSpec;

/// Errors returned by [`NlpConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("batch_size must be greater than 0")]
    ZeroBatchSize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Configuration of the NLP bridge component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NlpConfig {
    /// Name of the language model to load. Falls back to the language's
    /// default when absent.
    #[serde(default)]
    pub model: Option<String>,
    /// Keep the casing of texts before annotation. When `false`, `Hello`
    /// and `hello` get the same vectors.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Chunking hint for batched annotation; must be greater than zero.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            model: None,
            case_sensitive: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl NlpConfig {
    /// Ensure the configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBatchSize`] if `batch_size` is zero.
    #[must_use = "Validation should not be ignored"]
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.batch_size == 0 {
            Err(ConfigError::ZeroBatchSize)
        } else {
            Ok(self)
        }
    }

    /// Model spec for this configuration in `language`.
    #[must_use]
    pub fn model_spec<'a>(&'a self, language: &'a str) -> ModelSpec<'a> {
        ModelSpec::new(self.model.as_deref(), language)
    }

    /// Casing policy selected by `case_sensitive`.
    #[must_use]
    pub fn casing(&self) -> CasingPolicy {
        CasingPolicy::from_case_sensitive(self.case_sensitive)
    }
}
