//! Loading and validating models through the handle and the component.

mod support;

use nlp_bridge::providers::ModelLoader;
use nlp_bridge::providers::whitespace::{ModelDirectory, ModelDirectoryError, WhitespaceModel};
use nlp_bridge::{
    Attribute, ComponentError, LoadError, Message, ModelOrigin, NlpBridge, NlpConfig,
    PROVIDER_CONTEXT_KEY, ProviderHandle, ResolvedModel,
};
use rstest::{fixture, rstest};
use support::{RecordingSink, install_models};
use tempfile::TempDir;

/// Loader that "succeeds" with a model that was never read from disk.
struct BlankLoader;

impl ModelLoader for BlankLoader {
    type Model = WhitespaceModel;
    type Error = ModelDirectoryError;

    fn load(&self, _name: &str) -> Result<Option<Self::Model>, Self::Error> {
        Ok(Some(WhitespaceModel::blank("en")))
    }
}

#[fixture]
fn models() -> TempDir {
    install_models(&[("en_core_web_md", "en"), ("custom_de", "de")])
}

fn explicit(name: &str) -> ResolvedModel {
    ResolvedModel {
        name: name.to_owned(),
        origin: ModelOrigin::Explicit,
    }
}

#[test]
fn stub_model_is_rejected() {
    let result = ProviderHandle::acquire(&BlankLoader, explicit("en_core_web_md"));
    let Err(err) = result else {
        panic!("expected error")
    };
    assert!(matches!(err, LoadError::StubProvider { ref language } if language == "en"));
    assert!(err.to_string().contains("placeholder"));
}

#[rstest]
fn installed_model_is_acquired(models: TempDir) {
    let handle = ProviderHandle::acquire(&ModelDirectory::new(models.path()), explicit("custom_de"))
        .unwrap_or_else(|e| panic!("acquire failed: {e}"));
    assert_eq!(handle.model().meta().lang, "de");
    assert!(handle.provide_context().contains_key(PROVIDER_CONTEXT_KEY));
}

#[rstest]
fn missing_model_explains_remediation(models: TempDir) {
    let result = ProviderHandle::acquire(&ModelDirectory::new(models.path()), explicit("absent"));
    let Err(err) = result else {
        panic!("expected error")
    };
    let message = err.to_string();
    assert!(message.contains("'absent'"));
    assert!(message.contains("`model` property"));
    assert!(message.contains("installed upfront"));
}

#[rstest]
fn component_trains_and_processes(models: TempDir) {
    let sink = RecordingSink::default();
    let bridge = NlpBridge::create(
        NlpConfig::default(),
        "en",
        &ModelDirectory::new(models.path()),
        &sink,
    )
    .unwrap_or_else(|e| panic!("create failed: {e}"));
    assert_eq!(sink.messages.borrow().len(), 1);

    let mut examples = vec![
        Message::new().with(Attribute::Text, "Book a table"),
        Message::new().with(Attribute::Response, "Done"),
    ];
    bridge
        .train(&mut examples)
        .unwrap_or_else(|e| panic!("train failed: {e}"));
    assert_eq!(
        examples[0].doc(Attribute::Text).map(|d| d.text.as_str()),
        Some("book a table")
    );
    assert!(examples[1].doc(Attribute::Text).is_none());

    let mut message = Message::new().with(Attribute::Text, "Hi");
    bridge
        .process(&mut message)
        .unwrap_or_else(|e| panic!("process failed: {e}"));
    assert_eq!(message.doc(Attribute::Text).map(|d| d.tokens.len()), Some(1));
}

#[rstest]
fn unmapped_language_fails_before_loading(models: TempDir) {
    let sink = RecordingSink::default();
    let result = NlpBridge::create(
        NlpConfig::default(),
        "xx",
        &ModelDirectory::new(models.path()),
        &sink,
    );
    assert!(matches!(result, Err(ComponentError::Resolution(_))));
    assert!(sink.messages.borrow().is_empty());
}
