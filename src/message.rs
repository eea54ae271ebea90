//! Labelled examples and the attributes that can be annotated.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Example attribute eligible for dense featurisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// The user's text.
    Text,
    /// A bot response.
    Response,
    /// Text of an action.
    ActionText,
}

/// Attributes annotated by default.
pub const DENSE_FEATURIZABLE_ATTRIBUTES: &[Attribute] =
    &[Attribute::Text, Attribute::Response, Attribute::ActionText];

impl Attribute {
    /// Key of the attribute's text in a message.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Response => "response",
            Self::ActionText => "action_text",
        }
    }

    /// Key under which the attribute's document is attached.
    #[must_use]
    pub const fn doc_key(self) -> &'static str {
        match self {
            Self::Text => "text_nlp_doc",
            Self::Response => "response_nlp_doc",
            Self::ActionText => "action_text_nlp_doc",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A training or inference example.
///
/// Holds string-valued data keyed by name plus the documents attached to
/// it, keyed by [`Attribute`].
///
/// # Examples
///
/// ```
/// use nlp_bridge::message::{Attribute, Message};
///
/// let message: Message<()> = Message::new().with(Attribute::Text, "hello");
/// assert_eq!(message.get(Attribute::Text), Some("hello"));
/// assert!(message.doc(Attribute::Text).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message<D> {
    data: HashMap<String, String>,
    docs: HashMap<Attribute, D>,
}

impl<D> Default for Message<D> {
    fn default() -> Self {
        Self {
            data: HashMap::new(),
            docs: HashMap::new(),
        }
    }
}

impl<D> Message<D> {
    /// An example without data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An example holding `data`.
    #[must_use]
    pub fn from_data(data: HashMap<String, String>) -> Self {
        Self {
            data,
            docs: HashMap::new(),
        }
    }

    /// Set the text of `attribute`.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, text: impl Into<String>) -> Self {
        self.data.insert(attribute.as_str().to_owned(), text.into());
        self
    }

    /// Text of `attribute`, if present.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.data.get(attribute.as_str()).map(String::as_str)
    }

    /// Raw data of the example.
    #[must_use]
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }

    /// Attach `doc` under `attribute`, replacing any earlier document.
    pub fn set_doc(&mut self, attribute: Attribute, doc: D) {
        self.docs.insert(attribute, doc);
    }

    /// Document attached under `attribute`.
    #[must_use]
    pub fn doc(&self, attribute: Attribute) -> Option<&D> {
        self.docs.get(&attribute)
    }

    /// All attached documents.
    pub fn docs(&self) -> impl Iterator<Item = (Attribute, &D)> {
        self.docs.iter().map(|(attribute, doc)| (*attribute, doc))
    }
}
