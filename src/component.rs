//! Pipeline component linking a language model to training and inference.
//!
//! [`NlpBridge`] owns the loaded model for a run. The host creates it once,
//! asks for its [`cache_key`](NlpBridge::cache_key) to decide whether an
//! existing instance can be reused, and hands the model to later stages via
//! [`provide_context`](NlpBridge::provide_context).

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::advisory::{Advisory, AdvisorySink};
use crate::cache_key::derive_key;
use crate::config::{ConfigError, NlpConfig};
use crate::handle::{LoadError, ProviderHandle};
use crate::message::{DENSE_FEATURIZABLE_ATTRIBUTES, Message};
use crate::orchestrator::AttributeOrchestrator;
use crate::pipeline::PipelineError;
use crate::providers::{LanguageModel, ModelLoader};
use crate::resolver::{self, ResolutionError};

/// Errors returned while constructing an [`NlpBridge`].
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Component that annotates examples with a shared language model.
#[derive(Debug)]
pub struct NlpBridge<M> {
    config: NlpConfig,
    handle: ProviderHandle<M>,
}

impl<M> Clone for NlpBridge<M> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<M: LanguageModel> NlpBridge<M> {
    /// Component type name used in cache keys.
    pub const NAME: &'static str = "NlpBridge";

    /// External packages the component needs beyond the loader it is given.
    pub const REQUIRED_PACKAGES: &'static [&'static str] = &[];

    /// Validate `config`, resolve its model for `language` and load it.
    ///
    /// Falling back to the language's default model emits one advisory
    /// through `advisories`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] when the configuration is invalid, no
    /// model can be resolved, or loading fails.
    pub fn create<L>(
        config: NlpConfig,
        language: &str,
        loader: &L,
        advisories: &dyn AdvisorySink,
    ) -> Result<Self, ComponentError>
    where
        L: ModelLoader<Model = M>,
    {
        let config = config.validate()?;
        let resolved = resolver::resolve(&config.model_spec(language), Advisory::Emit(advisories))?;
        let handle = ProviderHandle::acquire(loader, resolved)?;
        Ok(Self { config, handle })
    }

    /// Reuse `cached` when the host found an equivalent component, or
    /// create a new one.
    ///
    /// # Errors
    ///
    /// See [`NlpBridge::create`].
    pub fn load<L>(
        config: NlpConfig,
        language: &str,
        loader: &L,
        advisories: &dyn AdvisorySink,
        cached: Option<Self>,
    ) -> Result<Self, ComponentError>
    where
        L: ModelLoader<Model = M>,
    {
        match cached {
            Some(component) => Ok(component),
            None => Self::create(config, language, loader, advisories),
        }
    }

    /// Cache key for `config` in `language`. Never emits advisories.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when no model can be resolved.
    pub fn cache_key(config: &NlpConfig, language: &str) -> Result<String, ResolutionError> {
        derive_key(Self::NAME, &config.model_spec(language))
    }

    /// Configuration the component was created with.
    #[must_use]
    pub fn config(&self) -> &NlpConfig {
        &self.config
    }

    /// Handle to the loaded model.
    #[must_use]
    pub fn handle(&self) -> &ProviderHandle<M> {
        &self.handle
    }

    /// Export the loaded model to downstream stages.
    #[must_use]
    pub fn provide_context(&self) -> HashMap<&'static str, Arc<M>> {
        self.handle.provide_context()
    }

    /// Annotate a single text after normalising it.
    ///
    /// # Errors
    ///
    /// Returns the model's error.
    pub fn doc_for_text(&self, text: &str) -> Result<M::Doc, M::Error> {
        let orchestrator = self.orchestrator();
        self.handle
            .model()
            .annotate(&orchestrator.preprocess(Some(text)))
    }

    /// Annotate a training collection and attach documents to its examples.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a batch fails.
    pub fn train(&self, examples: &mut [Message<M::Doc>]) -> Result<(), PipelineError<M::Error>> {
        self.orchestrator()
            .process_training_collection(examples, DENSE_FEATURIZABLE_ATTRIBUTES)
    }

    /// Annotate one example for inference.
    ///
    /// # Errors
    ///
    /// Returns the model's error.
    pub fn process(&self, message: &mut Message<M::Doc>) -> Result<(), M::Error> {
        self.orchestrator()
            .process_single_example(message, DENSE_FEATURIZABLE_ATTRIBUTES)
    }

    fn orchestrator(&self) -> AttributeOrchestrator<'_, M> {
        AttributeOrchestrator::new(self.handle.model(), self.config.casing())
            .with_batch_size(self.config.batch_size)
    }
}
