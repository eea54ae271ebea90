use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a whitespace model from disk.
#[derive(Debug, Error)]
pub enum ModelDirectoryError {
    #[error("no model directory at {path}")]
    NotInstalled { path: PathBuf },
    #[error("failed to read model metadata at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model metadata at {path}: {source}")]
    Meta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model metadata at {path} is invalid: {reason}")]
    InvalidMeta { path: PathBuf, reason: &'static str },
}

/// Errors returned while annotating text with a whitespace model.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnnotateError {
    #[error("text of length {length} exceeds the model maximum of {max_length} characters")]
    TextTooLong { length: usize, max_length: usize },
}
