//! CLI argument types and layered configuration for the `nlpb` binary.
//! Loads from CLI args, environment (prefix `NLPB_`), and optional config
//! files.
//!
//! `nlpb` resolves the configured model, prints the resolution and cache key
//! as a JSON line and, given a models directory and a JSONL input file,
//! annotates every message and prints its token counts per attribute.

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use ortho_config::OrthoError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::advisory::{Advisory, TracingAdvisories};
use crate::component::{ComponentError, NlpBridge};
use crate::config::{ConfigError, NlpConfig};
use crate::message::{DENSE_FEATURIZABLE_ATTRIBUTES, Message};
use crate::pipeline::{DEFAULT_BATCH_SIZE, PipelineError};
use crate::providers::AnnotatedDoc;
use crate::providers::whitespace::{AnnotateError, Document, ModelDirectory, WhitespaceModel};
use crate::resolver::{self, ModelOrigin, ResolutionError};

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Command-line arguments for the `nlpb` binary.
///
/// Configuration values are loaded from command line arguments, environment
/// variables (prefixed with `NLPB_`), and an optional configuration file.
///
/// # Examples
///
/// Parse flags directly:
/// ```
/// use nlp_bridge::cli::NlpbArgs;
/// use ortho_config::OrthoConfig;
///
/// let args = NlpbArgs::load_from_iter(["nlpb", "--case-sensitive=true"])
///     .expect("load args from CLI iterator");
/// assert!(args.case_sensitive);
/// ```
///
/// Load from a configuration file:
/// ```
/// use nlp_bridge::cli::NlpbArgs;
/// use ortho_config::OrthoConfig;
/// use std::io::Write;
/// use tempfile::NamedTempFile;
///
/// let mut file = NamedTempFile::new().expect("create temp file");
/// writeln!(file, "language = \"de\"").expect("write config");
/// let path = file.path().to_str().expect("path str");
/// let args = NlpbArgs::load_from_iter(["nlpb", "--config-path", path])
///     .expect("load args from config path");
/// assert_eq!(args.language(), "de");
/// ```
#[derive(Debug, Deserialize, ortho_config::OrthoConfig)]
#[ortho_config(prefix = "NLPB")]
pub struct NlpbArgs {
    /// Language model to load; falls back to the language default.
    #[serde(default)]
    pub model: Option<String>,

    /// Language code of the pipeline.
    #[serde(default)]
    pub language: Option<String>,

    /// Keep text casing before annotation.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub case_sensitive: bool,

    /// Chunking hint for batched annotation.
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Directory holding installed models, one subdirectory per model.
    #[serde(default)]
    pub models_dir: Option<PathBuf>,

    /// JSONL file of messages to annotate.
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Optional path to a configuration file.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl NlpbArgs {
    /// Load configuration solely from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if any variable cannot be parsed.
    pub fn load_from_env() -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Env::prefixed("NLPB_"))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if the file cannot be read or parsed.
    pub fn load_from_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from environment variables and a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if either source contains invalid values.
    pub fn load_from_env_and_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("NLPB_"))
            .extract()
            .map_err(Into::into)
    }

    /// Configured language, or [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Component configuration described by the arguments.
    #[must_use]
    pub fn nlp_config(&self) -> NlpConfig {
        NlpConfig {
            model: self.model.clone(),
            case_sensitive: self.case_sensitive,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

/// Errors returned by [`run`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Component(#[from] ComponentError),
    #[error(transparent)]
    Annotate(#[from] PipelineError<AnnotateError>),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid message on line {line} of {path}: {source}")]
    Message {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Resolution<'a> {
    model: &'a str,
    origin: &'static str,
    language: &'a str,
    cache_key: String,
}

#[derive(Serialize)]
struct Annotated<'a> {
    data: BTreeMap<&'a str, &'a str>,
    tokens: BTreeMap<&'static str, usize>,
}

/// Run `nlpb` with `args`, writing JSON lines to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when configuration, resolution, loading, reading
/// input, annotation, or writing output fails.
pub fn run(args: &NlpbArgs, out: &mut impl Write) -> Result<(), CliError> {
    let config = args.nlp_config().validate()?;
    let language = args.language();
    let resolved = resolver::resolve(&config.model_spec(language), Advisory::Silent)?;
    let summary = Resolution {
        model: &resolved.name,
        origin: match resolved.origin {
            ModelOrigin::Explicit => "explicit",
            ModelOrigin::Fallback { .. } => "fallback",
        },
        language,
        cache_key: NlpBridge::<WhitespaceModel>::cache_key(&config, language)?,
    };
    serde_json::to_writer(&mut *out, &summary)?;
    writeln!(out)?;

    let (Some(models_dir), Some(input)) = (&args.models_dir, &args.input) else {
        return Ok(());
    };
    let bridge = NlpBridge::create(
        config,
        language,
        &ModelDirectory::new(models_dir),
        &TracingAdvisories,
    )?;
    let mut messages = read_messages(input)?;
    bridge.train(&mut messages)?;
    for message in &messages {
        serde_json::to_writer(&mut *out, &annotated(message))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Read one message per non-blank line of a JSONL file.
///
/// String-valued fields become message data; other fields are ignored.
///
/// # Errors
///
/// Returns [`CliError::Read`] or [`CliError::Message`].
pub fn read_messages(path: &Path) -> Result<Vec<Message<Document>>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let fields: HashMap<String, serde_json::Value> =
                serde_json::from_str(line).map_err(|source| CliError::Message {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })?;
            let data = fields
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(text) => Some((key, text)),
                    _ => None,
                })
                .collect();
            Ok(Message::from_data(data))
        })
        .collect()
}

fn annotated(message: &Message<Document>) -> Annotated<'_> {
    Annotated {
        data: message
            .data()
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect(),
        tokens: DENSE_FEATURIZABLE_ATTRIBUTES
            .iter()
            .filter_map(|attribute| {
                message
                    .doc(*attribute)
                    .map(|doc| (attribute.doc_key(), doc.token_count()))
            })
            .collect(),
    }
}
