//! Document intake: raw extracted text to the read-only views the engine scores.

mod normalizer;
mod source;

pub use normalizer::{normalize, segment};
pub use source::{collect_inputs, read_text, DocumentError};

use serde::Serialize;

/// Both projections of one document, derived once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentView {
    normalized_text: String,
    sentences: Vec<String>,
}

impl DocumentView {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            normalized_text: normalize(raw),
            sentences: segment(raw),
        }
    }

    /// Lowercase, punctuation-free, whitespace-collapsed full text.
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Sentences in document order with original casing.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }
}
