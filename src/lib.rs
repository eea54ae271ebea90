//! Core library entry point.
//! Re-exports public types and traits.

pub mod advisory;
pub mod cache_key;
#[cfg(feature = "cli")]
pub mod cli;
pub mod component;
pub mod config;
pub mod handle;
pub mod message;
pub mod orchestrator;
pub mod pipeline;
pub mod providers;
pub mod resolver;

pub use advisory::{Advisory, AdvisorySink, TracingAdvisories};
pub use cache_key::derive_key;
#[cfg(feature = "cli")]
pub use cli::NlpbArgs;
pub use component::{ComponentError, NlpBridge};
pub use config::{ConfigError, NlpConfig};
pub use handle::{LoadError, PROVIDER_CONTEXT_KEY, ProviderHandle};
pub use message::{Attribute, DENSE_FEATURIZABLE_ATTRIBUTES, Message};
pub use orchestrator::{AttributeDocumentMap, AttributeOrchestrator, CasingPolicy};
pub use pipeline::{BatchDocumentPipeline, IndexedDoc, IndexedText, PipelineError};
pub use providers::{AnnotatedDoc, LanguageModel, ModelLoader};
pub use resolver::{FallbackTable, ModelOrigin, ModelSpec, ResolutionError, ResolvedModel};
