//! Ordered batch annotation.
//!
//! Texts are tagged with their original position, split into content-bearing
//! and empty texts, and processed on two paths: content-bearing texts go to
//! the model in a single batched call, while empty texts get the model's
//! empty document without touching the model. Both result sets are merged
//! back by position, so the output order never depends on which path an item
//! took.

use thiserror::Error;

use crate::providers::LanguageModel;

/// Default chunking hint passed to [`LanguageModel::batch_process`].
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// A text tagged with its position in the original input.
pub type IndexedText = (usize, String);

/// A document tagged with the position of the text it was built from.
pub type IndexedDoc<D> = (usize, D);

/// Errors returned by [`BatchDocumentPipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    /// The model failed while annotating the batch.
    #[error("language model failed to annotate batch: {0}")]
    Provider(#[source] E),
    /// The model returned a different number of documents than texts sent.
    #[error("language model returned {actual} documents for {expected} texts")]
    BatchLengthMismatch { expected: usize, actual: usize },
}

/// Split texts into content-bearing and empty ones.
///
/// Relative order is kept within each group.
#[must_use]
pub fn partition_by_content(texts: Vec<IndexedText>) -> (Vec<IndexedText>, Vec<IndexedText>) {
    texts.into_iter().partition(|(_, text)| !text.is_empty())
}

/// Restore original order by sorting on position.
#[must_use]
pub fn merge_by_position<D>(
    mut content: Vec<IndexedDoc<D>>,
    empty: Vec<IndexedDoc<D>>,
) -> Vec<IndexedDoc<D>> {
    content.extend(empty);
    content.sort_by_key(|(position, _)| *position);
    content
}

/// Runs indexed texts through a model's batched call.
#[derive(Debug)]
pub struct BatchDocumentPipeline<'a, M> {
    model: &'a M,
    batch_size: usize,
}

impl<'a, M: LanguageModel> BatchDocumentPipeline<'a, M> {
    /// Pipeline over `model` with the default batch size.
    #[must_use]
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the chunking hint passed to the model.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Annotate every text and return documents in position order.
    ///
    /// Empty texts never reach the model; they get
    /// [`LanguageModel::empty_doc`]. Duplicate texts are annotated
    /// independently.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the batched call fails or returns the
    /// wrong number of documents. No partial output is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use nlp_bridge::pipeline::BatchDocumentPipeline;
    /// use nlp_bridge::providers::AnnotatedDoc;
    /// use nlp_bridge::providers::whitespace::{ModelMeta, WhitespaceModel};
    ///
    /// let model = WhitespaceModel::from_meta(ModelMeta::new("en"), "/models/en");
    /// let docs = BatchDocumentPipeline::new(&model)
    ///     .run(vec![(0, "hello there".into()), (1, String::new())])
    ///     .unwrap();
    /// assert_eq!(docs[0].1.token_count(), 2);
    /// assert!(docs[1].1.is_empty());
    /// ```
    pub fn run(
        &self,
        texts: Vec<IndexedText>,
    ) -> Result<Vec<IndexedDoc<M::Doc>>, PipelineError<M::Error>> {
        let (content, empty) = partition_by_content(texts);
        tracing::debug!(
            content = content.len(),
            empty = empty.len(),
            "partitioned texts for batch annotation"
        );
        let content_docs = self.process_content_bearing(content)?;
        let empty_docs = self.process_empty(&empty);
        Ok(merge_by_position(content_docs, empty_docs))
    }

    fn process_content_bearing(
        &self,
        samples: Vec<IndexedText>,
    ) -> Result<Vec<IndexedDoc<M::Doc>>, PipelineError<M::Error>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<&str> = samples.iter().map(|(_, text)| text.as_str()).collect();
        let docs = self
            .model
            .batch_process(&texts, self.batch_size)
            .map_err(PipelineError::Provider)?;
        if docs.len() != samples.len() {
            return Err(PipelineError::BatchLengthMismatch {
                expected: samples.len(),
                actual: docs.len(),
            });
        }
        Ok(samples
            .into_iter()
            .map(|(position, _)| position)
            .zip(docs)
            .collect())
    }

    fn process_empty(&self, samples: &[IndexedText]) -> Vec<IndexedDoc<M::Doc>> {
        samples
            .iter()
            .map(|(position, _)| (*position, self.model.empty_doc()))
            .collect()
    }
}
