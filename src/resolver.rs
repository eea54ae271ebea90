//! Model name resolution with a per-language fallback table.
//!
//! A configuration may name its language model explicitly or leave it out.
//! When it is left out, the language code selects a default from a static
//! [`FallbackTable`]. Resolution never touches the provider: the same
//! [`ModelSpec`] always resolves to the same name.

use std::fmt;

use thiserror::Error;

use crate::advisory::Advisory;

const BUILTIN_FALLBACKS: &[(&str, &str)] = &[
    ("zh", "zh_core_web_md"),
    ("da", "da_core_news_md"),
    ("nl", "nl_core_news_md"),
    ("en", "en_core_web_md"),
    ("fr", "fr_core_news_md"),
    ("de", "de_core_news_sm"),
    ("el", "el_core_news_md"),
    ("it", "it_core_news_md"),
    ("ja", "ja_core_news_md"),
    ("lt", "lt_core_news_md"),
    ("mk", "mk_core_news_md"),
    ("nb", "nb_core_news_md"),
    ("pl", "pl_core_news_md"),
    ("pt", "pt_core_news_md"),
    ("ro", "ro_core_news_md"),
    ("ru", "ru_core_news_md"),
    ("es", "es_core_news_md"),
];

static BUILTIN: FallbackTable = FallbackTable {
    entries: BUILTIN_FALLBACKS,
};

/// Errors returned while resolving a model name.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolutionError {
    /// No explicit model was configured and the language has no default.
    #[error(
        "there is no fallback model for language '{language}'; \
         add a `model` property to the NlpBridge configuration to select one"
    )]
    NoFallbackAvailable {
        /// Language code that had no table entry.
        language: String,
    },
}

/// Declared model configuration: an optional explicit name plus the
/// pipeline language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec<'a> {
    /// Explicitly configured model name. Empty strings count as absent.
    pub explicit_name: Option<&'a str>,
    /// Language code of the pipeline, e.g. `"en"`.
    pub language: &'a str,
}

impl<'a> ModelSpec<'a> {
    /// Build a spec from an optional explicit name and a language code.
    #[must_use]
    pub fn new(explicit_name: Option<&'a str>, language: &'a str) -> Self {
        Self {
            explicit_name,
            language,
        }
    }
}

/// Where a resolved model name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOrigin {
    /// The configuration named the model.
    Explicit,
    /// The fallback table supplied the model for a language.
    Fallback {
        /// Language the fallback was chosen for.
        language: String,
    },
}

impl fmt::Display for ModelOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => f.write_str("configured via the `model` property"),
            Self::Fallback { language } => {
                write!(f, "chosen as the fallback for language '{language}'")
            }
        }
    }
}

/// A concrete model name ready to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Name passed to the model loader.
    pub name: String,
    /// How the name was obtained.
    pub origin: ModelOrigin,
}

/// Immutable mapping from language code to default model name.
#[derive(Debug, Clone, Copy)]
pub struct FallbackTable {
    entries: &'static [(&'static str, &'static str)],
}

impl FallbackTable {
    /// Table shipped with the crate.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from static `(language, model)` pairs.
    ///
    /// The first entry wins when a language appears twice.
    #[must_use]
    pub const fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Default model name for `language`, if any.
    #[must_use]
    pub fn lookup(&self, language: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, model)| *model)
    }

    /// Languages covered by the table, in table order.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(lang, _)| *lang)
    }

    /// Resolve `spec` to a concrete model name.
    ///
    /// An explicit, non-empty name is returned verbatim. Otherwise the
    /// language's fallback is used and, when `advisory` allows it, a
    /// deprecation notice naming the fallback is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NoFallbackAvailable`] when no explicit
    /// name was given and the language is not in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use nlp_bridge::advisory::Advisory;
    /// use nlp_bridge::resolver::{FallbackTable, ModelSpec};
    ///
    /// let resolved = FallbackTable::builtin()
    ///     .resolve(&ModelSpec::new(None, "en"), Advisory::Silent)
    ///     .unwrap();
    /// assert_eq!(resolved.name, "en_core_web_md");
    /// ```
    pub fn resolve(
        &self,
        spec: &ModelSpec<'_>,
        advisory: Advisory<'_>,
    ) -> Result<ResolvedModel, ResolutionError> {
        if let Some(name) = spec.explicit_name.filter(|name| !name.is_empty()) {
            return Ok(ResolvedModel {
                name: name.to_owned(),
                origin: ModelOrigin::Explicit,
            });
        }

        let name = self
            .lookup(spec.language)
            .ok_or_else(|| ResolutionError::NoFallbackAvailable {
                language: spec.language.to_owned(),
            })?;

        advisory.deprecation(&format!(
            "language model is not properly configured; add a `model` property to NlpBridge. \
             Will use '{name}' as a fallback model. This fallback is deprecated."
        ));

        Ok(ResolvedModel {
            name: name.to_owned(),
            origin: ModelOrigin::Fallback {
                language: spec.language.to_owned(),
            },
        })
    }
}

/// Resolve `spec` against the built-in table.
///
/// # Errors
///
/// See [`FallbackTable::resolve`].
pub fn resolve(
    spec: &ModelSpec<'_>,
    advisory: Advisory<'_>,
) -> Result<ResolvedModel, ResolutionError> {
    FallbackTable::builtin().resolve(spec, advisory)
}
