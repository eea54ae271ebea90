//! Provider interfaces for language models and their loaders.
//!
//! A language model turns raw text into an annotated document. The pipeline
//! only relies on the capabilities declared here; tokenisation, vectors and
//! model storage stay behind the trait.

pub mod whitespace;

/// An annotated document produced by a [`LanguageModel`].
pub trait AnnotatedDoc {
    /// Number of tokens in the document.
    fn token_count(&self) -> usize;

    /// Whether the document carries no tokens.
    fn is_empty(&self) -> bool {
        self.token_count() == 0
    }
}

/// A loaded language model.
///
/// Annotation calls take `&self`; implementations must not mutate model
/// state while annotating so a single instance can serve a whole run.
pub trait LanguageModel {
    /// Document type produced by the model.
    type Doc: AnnotatedDoc + Send + Sync + 'static;
    /// Error type returned when annotation fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Language code of the model, e.g. `"en"`.
    fn language(&self) -> &str;

    /// Whether the model was loaded from real model data.
    ///
    /// Placeholder models that were never backed by model data report
    /// `false` and are rejected when acquiring a handle.
    fn is_backed_by_real_model(&self) -> bool;

    /// Annotate a single text.
    ///
    /// # Errors
    ///
    /// Returns an error if annotation fails.
    fn annotate(&self, text: &str) -> Result<Self::Doc, Self::Error>;

    /// Annotate many texts at once.
    ///
    /// The output has one document per input, in input order. `batch_size`
    /// is a chunking hint only. The default implementation annotates each
    /// text in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if annotating any text fails.
    fn batch_process(
        &self,
        texts: &[&str],
        batch_size: usize,
    ) -> Result<Vec<Self::Doc>, Self::Error> {
        let _ = batch_size;
        texts.iter().map(|text| self.annotate(text)).collect()
    }

    /// A document with zero tokens, used for empty input texts.
    fn empty_doc(&self) -> Self::Doc;
}

/// Loads language models by name.
pub trait ModelLoader {
    /// Model type produced by the loader.
    type Model: LanguageModel;
    /// Error returned when the model is not available.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the model called `name`.
    ///
    /// `Ok(None)` means the loader ran but produced no model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not installed or cannot be read.
    fn load(&self, name: &str) -> Result<Option<Self::Model>, Self::Error>;
}
