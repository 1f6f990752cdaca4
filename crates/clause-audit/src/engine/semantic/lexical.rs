use std::collections::BTreeSet;

/// Words carrying no evidential weight for the pre-filter. Includes generic
/// compliance vocabulary ("process", "plan", ...) that appears in nearly every
/// policy sentence.
const STOP_WORDS: [&str; 41] = [
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what", "when", "where", "how",
    "who", "which", "this", "that", "these", "those", "then", "just", "so", "than", "such",
    "both", "through", "about", "for", "is", "of", "while", "during", "to", "with", "process",
    "procedure", "documented", "defined", "system", "plan", "management",
];

const MIN_TOKEN_LEN: usize = 3;

/// Lowercase alphabetic words of at least three letters, minus stop words.
///
/// Only whole words made of `a-z` count; alphanumeric runs such as `covid19`
/// are skipped entirely.
pub fn content_tokens(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| {
            word.len() >= MIN_TOKEN_LEN
                && word.chars().all(|c| c.is_ascii_lowercase())
                && !STOP_WORDS.contains(word)
        })
        .map(str::to_string)
        .collect()
}

/// Precomputed signal side of the pre-filter.
#[derive(Debug, Clone)]
pub struct SignalFilter {
    raw: String,
    tokens: BTreeSet<String>,
}

impl SignalFilter {
    pub fn new(signal: &str) -> Self {
        Self {
            raw: signal.to_lowercase(),
            tokens: content_tokens(signal),
        }
    }

    /// Whether a sentence plausibly concerns this signal: shared content
    /// vocabulary, or raw containment when the signal has no content words.
    pub fn admits(&self, sentence: &str, sentence_tokens: &BTreeSet<String>) -> bool {
        if self.tokens.is_empty() {
            return !self.raw.trim().is_empty() && sentence.to_lowercase().contains(&self.raw);
        }
        !self.tokens.is_disjoint(sentence_tokens)
    }
}
