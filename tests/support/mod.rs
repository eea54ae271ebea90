//! Shared fixtures for integration tests.

use nlp_bridge::AdvisorySink;
use nlp_bridge::providers::LanguageModel;
use nlp_bridge::providers::whitespace::{
    AnnotateError, Document, META_FILE, ModelMeta, WhitespaceModel,
};
use std::cell::RefCell;
use std::fs;
use std::sync::{Mutex, PoisonError};
use tempfile::TempDir;

/// Whitespace model that records the texts it receives.
pub struct RecordingModel {
    pub inner: WhitespaceModel,
    batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: WhitespaceModel::from_meta(ModelMeta::new("en"), "/models/recording"),
            batches: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LanguageModel for RecordingModel {
    type Doc = Document;
    type Error = AnnotateError;

    fn language(&self) -> &str {
        self.inner.language()
    }

    fn is_backed_by_real_model(&self) -> bool {
        true
    }

    fn annotate(&self, text: &str) -> Result<Self::Doc, Self::Error> {
        self.inner.annotate(text)
    }

    fn batch_process(
        &self,
        texts: &[&str],
        batch_size: usize,
    ) -> Result<Vec<Self::Doc>, Self::Error> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(texts.iter().map(ToString::to_string).collect());
        self.inner.batch_process(texts, batch_size)
    }

    fn empty_doc(&self) -> Self::Doc {
        self.inner.empty_doc()
    }
}

/// Advisory sink that records every notice.
#[derive(Default)]
pub struct RecordingSink {
    pub messages: RefCell<Vec<String>>,
}

impl AdvisorySink for RecordingSink {
    fn deprecation(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// Temporary models root with one `meta.json` per named model.
#[must_use]
pub fn install_models(models: &[(&str, &str)]) -> TempDir {
    let root = TempDir::new().unwrap_or_else(|e| panic!("create temp dir: {e}"));
    for (name, lang) in models {
        let dir = root.path().join(name);
        fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create model dir: {e}"));
        let meta = serde_json::to_string(&ModelMeta::new(*lang))
            .unwrap_or_else(|e| panic!("serialise meta: {e}"));
        fs::write(dir.join(META_FILE), meta).unwrap_or_else(|e| panic!("write meta: {e}"));
    }
    root
}
