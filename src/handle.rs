//! Ownership and validation of a loaded language model.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::providers::{LanguageModel, ModelLoader};
use crate::resolver::{ModelOrigin, ResolvedModel};

/// Key under which [`ProviderHandle::provide_context`] exports the model.
pub const PROVIDER_CONTEXT_KEY: &str = "nlp_provider";

/// Errors returned while acquiring a model.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "please confirm that '{model}' ({origin}) is an available language model; \
         it must be installed upfront, for example by placing it under the models directory: {source}"
    )]
    ModelNotInstalled {
        model: String,
        origin: ModelOrigin,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to load language model '{model}': loading returned no model")]
    NullProvider { model: String },
    #[error(
        "failed to load language model for language '{language}': the loaded model is a \
         placeholder without model data; make sure the correct model is installed"
    )]
    StubProvider { language: String },
}

/// A loaded language model shared for a whole run.
#[derive(Debug)]
pub struct ProviderHandle<M> {
    model: Arc<M>,
    resolved: ResolvedModel,
}

impl<M> Clone for ProviderHandle<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            resolved: self.resolved.clone(),
        }
    }
}

impl<M: LanguageModel> ProviderHandle<M> {
    /// Load and validate the model named by `resolved`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ModelNotInstalled`] when the loader fails, and
    /// the errors of [`ensure_usable`] otherwise.
    pub fn acquire<L>(loader: &L, resolved: ResolvedModel) -> Result<Self, LoadError>
    where
        L: ModelLoader<Model = M>,
    {
        tracing::info!(model = %resolved.name, "trying to load language model");
        let loaded = loader
            .load(&resolved.name)
            .map_err(|source| LoadError::ModelNotInstalled {
                model: resolved.name.clone(),
                origin: resolved.origin.clone(),
                source: Box::new(source),
            })?;
        let model = ensure_usable(loaded, &resolved.name)?;
        Ok(Self {
            model: Arc::new(model),
            resolved,
        })
    }

    /// The loaded model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// A shared reference to the loaded model.
    #[must_use]
    pub fn shared(&self) -> Arc<M> {
        Arc::clone(&self.model)
    }

    /// The resolved model this handle was acquired for.
    #[must_use]
    pub fn resolved(&self) -> &ResolvedModel {
        &self.resolved
    }

    /// Export the model for downstream pipeline stages.
    #[must_use]
    pub fn provide_context(&self) -> HashMap<&'static str, Arc<M>> {
        HashMap::from([(PROVIDER_CONTEXT_KEY, self.shared())])
    }
}

/// Check that a load produced a real model.
///
/// # Errors
///
/// Returns [`LoadError::NullProvider`] for `None` and
/// [`LoadError::StubProvider`] for a model without model data.
pub fn ensure_usable<M: LanguageModel>(loaded: Option<M>, model: &str) -> Result<M, LoadError> {
    let Some(loaded) = loaded else {
        return Err(LoadError::NullProvider {
            model: model.to_owned(),
        });
    };
    if !loaded.is_backed_by_real_model() {
        return Err(LoadError::StubProvider {
            language: loaded.language().to_owned(),
        });
    }
    Ok(loaded)
}
