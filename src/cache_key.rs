//! Cache keys deciding whether a resident model can be reused.

use crate::advisory::Advisory;
use crate::resolver::{FallbackTable, ModelSpec, ResolutionError};

/// Derive the cache key for `component` configured with `spec`.
///
/// Resolution runs silently: probing the cache never emits advisories.
/// Two configurations share a key exactly when they resolve to the same
/// model name.
///
/// # Errors
///
/// Propagates [`ResolutionError`] from resolution.
///
/// # Examples
///
/// ```
/// use nlp_bridge::cache_key::derive_key;
/// use nlp_bridge::resolver::ModelSpec;
///
/// let key = derive_key("NlpBridge", &ModelSpec::new(None, "en")).unwrap();
/// assert_eq!(key, "NlpBridge-en_core_web_md");
/// ```
pub fn derive_key(component: &str, spec: &ModelSpec<'_>) -> Result<String, ResolutionError> {
    derive_key_with(FallbackTable::builtin(), component, spec)
}

/// [`derive_key`] against a custom fallback table.
///
/// # Errors
///
/// Propagates [`ResolutionError`] from resolution.
pub fn derive_key_with(
    table: &FallbackTable,
    component: &str,
    spec: &ModelSpec<'_>,
) -> Result<String, ResolutionError> {
    let resolved = table.resolve(spec, Advisory::Silent)?;
    Ok(format!("{component}-{}", resolved.name))
}
