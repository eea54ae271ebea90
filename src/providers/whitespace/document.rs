//! Documents produced by the whitespace model.

use serde::Serialize;

use crate::providers::AnnotatedDoc;

/// One token of a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Token text as it appears in the input.
    pub text: String,
    /// Byte offset of the token in the input.
    pub offset: usize,
    /// Lower-case base form.
    pub lemma: String,
    /// Token vector.
    pub vector: Box<[f32]>,
}

/// An annotated text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Language of the model that produced the document.
    pub lang: String,
    /// Text the document was built from.
    pub text: String,
    /// Tokens in input order.
    pub tokens: Vec<Token>,
}

impl Document {
    /// A document with no text and no tokens.
    #[must_use]
    pub fn empty(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            text: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Token texts in order.
    pub fn token_texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.text.as_str())
    }
}

impl AnnotatedDoc for Document {
    fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
