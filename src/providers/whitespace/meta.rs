//! On-disk metadata describing a whitespace model.

use serde::{Deserialize, Serialize};

/// Name of the metadata file inside a model directory.
pub const META_FILE: &str = "meta.json";

const DEFAULT_VECTOR_WIDTH: usize = 8;
const DEFAULT_MAX_LENGTH: usize = 1_000_000;

fn default_vector_width() -> usize {
    DEFAULT_VECTOR_WIDTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

/// Contents of `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelMeta {
    /// Language code served by the model.
    pub lang: String,
    /// Width of each token vector; must be greater than zero.
    #[serde(default = "default_vector_width")]
    pub vector_width: usize,
    /// Longest text, in characters, the model accepts.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl ModelMeta {
    /// Metadata for `lang` with default settings.
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            vector_width: DEFAULT_VECTOR_WIDTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Ensure the metadata values are usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(self) -> Result<Self, &'static str> {
        if self.lang.is_empty() {
            Err("lang must not be empty")
        } else if self.vector_width == 0 {
            Err("vector_width must be greater than 0")
        } else if self.max_length == 0 {
            Err("max_length must be greater than 0")
        } else {
            Ok(self)
        }
    }
}
