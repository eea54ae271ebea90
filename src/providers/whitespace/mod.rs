//! Lightweight language model that tokenises on word boundaries.
//!
//! The model reads its settings from a directory containing `meta.json`.
//! Lemmas are naïve lower-case singular forms and vectors are derived from a
//! stable hash of the lower-cased token, which is enough to exercise the
//! pipeline end to end without a heavyweight NLP runtime.
mod document;
mod errors;
mod meta;
pub mod tokens;

pub use document::{Document, Token};
pub use errors::{AnnotateError, ModelDirectoryError};
pub use meta::{META_FILE, ModelMeta};

use std::fs;
use std::path::{Path, PathBuf};

use crate::providers::{LanguageModel, ModelLoader};

/// Word-boundary tokeniser with hashed vectors.
///
/// # Examples
///
/// ```
/// use nlp_bridge::providers::whitespace::{ModelMeta, WhitespaceModel};
/// use nlp_bridge::providers::{AnnotatedDoc, LanguageModel};
///
/// let model = WhitespaceModel::from_meta(ModelMeta::new("en"), "/models/en_ws");
/// let doc = model.annotate("Hello world").unwrap();
/// assert_eq!(doc.token_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WhitespaceModel {
    meta: ModelMeta,
    path: Option<PathBuf>,
}

impl WhitespaceModel {
    /// Model backed by the directory at `path`.
    #[must_use]
    pub fn from_meta(meta: ModelMeta, path: impl Into<PathBuf>) -> Self {
        Self {
            meta,
            path: Some(path.into()),
        }
    }

    /// Placeholder model for `lang` that was not loaded from disk.
    ///
    /// It can annotate, but [`LanguageModel::is_backed_by_real_model`]
    /// reports `false`.
    #[must_use]
    pub fn blank(lang: impl Into<String>) -> Self {
        Self {
            meta: ModelMeta::new(lang),
            path: None,
        }
    }

    /// Load the model stored in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelDirectoryError`] when the directory or its metadata is
    /// missing or invalid.
    pub fn from_dir(dir: &Path) -> Result<Self, ModelDirectoryError> {
        if !dir.is_dir() {
            return Err(ModelDirectoryError::NotInstalled {
                path: dir.to_path_buf(),
            });
        }
        let meta_path = dir.join(META_FILE);
        let raw = fs::read_to_string(&meta_path).map_err(|source| ModelDirectoryError::Io {
            path: meta_path.clone(),
            source,
        })?;
        let meta: ModelMeta =
            serde_json::from_str(&raw).map_err(|source| ModelDirectoryError::Meta {
                path: meta_path.clone(),
                source,
            })?;
        let meta = meta
            .validate()
            .map_err(|reason| ModelDirectoryError::InvalidMeta {
                path: meta_path,
                reason,
            })?;
        Ok(Self::from_meta(meta, dir))
    }

    /// Directory the model was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Model settings.
    #[must_use]
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }
}

impl LanguageModel for WhitespaceModel {
    type Doc = Document;
    type Error = AnnotateError;

    fn language(&self) -> &str {
        &self.meta.lang
    }

    fn is_backed_by_real_model(&self) -> bool {
        self.path.is_some()
    }

    fn annotate(&self, text: &str) -> Result<Self::Doc, Self::Error> {
        let length = text.chars().count();
        if length > self.meta.max_length {
            return Err(AnnotateError::TextTooLong {
                length,
                max_length: self.meta.max_length,
            });
        }
        let tokens = tokens::split_tokens(text)
            .map(|(offset, word)| Token {
                text: word.to_owned(),
                offset,
                lemma: tokens::lemmatise(word),
                vector: tokens::hashed_vector(word, self.meta.vector_width),
            })
            .collect();
        Ok(Document {
            lang: self.meta.lang.clone(),
            text: text.to_owned(),
            tokens,
        })
    }

    fn batch_process(
        &self,
        texts: &[&str],
        batch_size: usize,
    ) -> Result<Vec<Self::Doc>, Self::Error> {
        let mut docs = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(batch_size.max(1)) {
            tracing::trace!(size = chunk.len(), "annotating chunk");
            for text in chunk {
                docs.push(self.annotate(text)?);
            }
        }
        Ok(docs)
    }

    fn empty_doc(&self) -> Self::Doc {
        Document::empty(self.meta.lang.clone())
    }
}

/// Loader resolving model names to subdirectories of a models root.
#[derive(Debug, Clone)]
pub struct ModelDirectory {
    root: PathBuf,
}

impl ModelDirectory {
    /// Loader for models installed under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory a model called `name` is expected in.
    #[must_use]
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ModelLoader for ModelDirectory {
    type Model = WhitespaceModel;
    type Error = ModelDirectoryError;

    fn load(&self, name: &str) -> Result<Option<Self::Model>, Self::Error> {
        WhitespaceModel::from_dir(&self.model_path(name)).map(Some)
    }
}
