//! Delivery of non-fatal advisories raised while resolving model names.
//!
//! Advisories are informational: they never change control flow. The host
//! decides where they go by supplying an [`AdvisorySink`]; the default sink
//! forwards them to `tracing` at `WARN` level.

/// Receives deprecation-style notices.
pub trait AdvisorySink {
    /// Deliver a deprecation notice.
    fn deprecation(&self, message: &str);
}

/// Sink that logs advisories through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAdvisories;

impl AdvisorySink for TracingAdvisories {
    fn deprecation(&self, message: &str) {
        tracing::warn!(target: "nlp_bridge::deprecation", "{message}");
    }
}

/// Whether a resolution step may emit advisories.
#[derive(Clone, Copy)]
pub enum Advisory<'a> {
    /// Never emit. Used when probing, e.g. for cache keys.
    Silent,
    /// Emit through the given sink.
    Emit(&'a dyn AdvisorySink),
}

impl Advisory<'_> {
    pub(crate) fn deprecation(self, message: &str) {
        if let Self::Emit(sink) = self {
            sink.deprecation(message);
        }
    }
}

impl std::fmt::Debug for Advisory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Silent => f.write_str("Silent"),
            Self::Emit(_) => f.write_str("Emit(..)"),
        }
    }
}
