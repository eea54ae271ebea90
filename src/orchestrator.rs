//! Per-attribute annotation of example collections.
//!
//! Training runs every attribute through [`BatchDocumentPipeline`] and only
//! attaches documents that carry tokens. Inference on a single example skips
//! the batching machinery and annotates each present attribute directly.

use std::collections::HashMap;

use crate::message::{Attribute, Message};
use crate::pipeline::{BatchDocumentPipeline, DEFAULT_BATCH_SIZE, IndexedText, PipelineError};
use crate::providers::{AnnotatedDoc, LanguageModel};

/// Whether texts keep their casing before annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasingPolicy {
    /// Lower-case every text.
    #[default]
    Insensitive,
    /// Pass texts through unchanged.
    Sensitive,
}

impl CasingPolicy {
    /// Policy for a `case_sensitive` flag.
    #[must_use]
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }
}

/// Documents per attribute, one per example, in example order.
pub type AttributeDocumentMap<D> = HashMap<Attribute, Vec<D>>;

/// Annotates example attributes with a language model.
#[derive(Debug)]
pub struct AttributeOrchestrator<'a, M> {
    model: &'a M,
    casing: CasingPolicy,
    batch_size: usize,
}

impl<'a, M: LanguageModel> AttributeOrchestrator<'a, M> {
    /// Orchestrator over `model`.
    #[must_use]
    pub fn new(model: &'a M, casing: CasingPolicy) -> Self {
        Self {
            model,
            casing,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the chunking hint used for training batches.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Normalise a raw attribute text: absent becomes empty, and the text is
    /// lower-cased unless the policy is case-sensitive.
    #[must_use]
    pub fn preprocess(&self, text: Option<&str>) -> String {
        let text = text.unwrap_or_default();
        match self.casing {
            CasingPolicy::Sensitive => text.to_owned(),
            CasingPolicy::Insensitive => text.to_lowercase(),
        }
    }

    /// Annotate every attribute of every example.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a batch fails; no map is produced.
    pub fn docs_for_training_data(
        &self,
        examples: &[Message<M::Doc>],
        attributes: &[Attribute],
    ) -> Result<AttributeDocumentMap<M::Doc>, PipelineError<M::Error>> {
        let pipeline = BatchDocumentPipeline::new(self.model).with_batch_size(self.batch_size);
        let mut attribute_docs = HashMap::with_capacity(attributes.len());
        for &attribute in attributes {
            let texts: Vec<IndexedText> = examples
                .iter()
                .map(|example| self.preprocess(example.get(attribute)))
                .enumerate()
                .collect();
            let docs = pipeline
                .run(texts)?
                .into_iter()
                .map(|(_, doc)| doc)
                .collect();
            attribute_docs.insert(attribute, docs);
        }
        Ok(attribute_docs)
    }

    /// Annotate a training collection and attach non-empty documents.
    ///
    /// Documents with no tokens come from absent or empty texts and are not
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a batch fails. Examples are left
    /// untouched in that case.
    pub fn process_training_collection(
        &self,
        examples: &mut [Message<M::Doc>],
        attributes: &[Attribute],
    ) -> Result<(), PipelineError<M::Error>> {
        let attribute_docs = self.docs_for_training_data(examples, attributes)?;
        for (attribute, docs) in attribute_docs {
            for (example, doc) in examples.iter_mut().zip(docs) {
                if !doc.is_empty() {
                    example.set_doc(attribute, doc);
                }
            }
        }
        Ok(())
    }

    /// Annotate one example for inference.
    ///
    /// Every attribute with a non-empty raw text is annotated on its own and
    /// attached, whatever the resulting token count.
    ///
    /// # Errors
    ///
    /// Returns the model's error; attributes annotated before the failure
    /// stay attached.
    pub fn process_single_example(
        &self,
        example: &mut Message<M::Doc>,
        attributes: &[Attribute],
    ) -> Result<(), M::Error> {
        for &attribute in attributes {
            let Some(raw) = example.get(attribute).filter(|text| !text.is_empty()) else {
                continue;
            };
            let text = self.preprocess(Some(raw));
            let doc = self.model.annotate(&text)?;
            example.set_doc(attribute, doc);
        }
        Ok(())
    }
}
