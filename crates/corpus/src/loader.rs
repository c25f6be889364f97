use crate::error::{CorpusError, Result};
use crate::segmenter::Segmenter;
use std::collections::HashSet;
use std::path::Path;

/// One deduplicated sentence, kept in the token form the segmenter produced.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Deduplication identity: tokens joined by a single space.
    #[must_use]
    pub fn key(&self) -> String {
        self.tokens.join(" ")
    }

    /// Display form with token separators removed.
    #[must_use]
    pub fn display(&self) -> String {
        self.tokens.concat()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Loads candidate sentences from a text file, one per line.
///
/// Lines are trimmed, segmented, and deduplicated on their joined token key.
/// First-seen order is preserved so repeated runs over the same corpus
/// produce identical output downstream. Lines that segment to zero tokens
/// (e.g. punctuation-only) are dropped.
pub async fn load_titles(
    path: impl AsRef<Path>,
    segmenter: &dyn Segmenter,
) -> Result<Vec<TokenSequence>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes).map_err(|_| CorpusError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    let mut seen = HashSet::new();
    let mut sentences = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens = segmenter.segment(line);
        if tokens.is_empty() {
            log::debug!("Skipping line that segmented to no tokens: {line:?}");
            continue;
        }
        let sentence = TokenSequence::new(tokens);
        if seen.insert(sentence.key()) {
            sentences.push(sentence);
        }
    }

    log::info!(
        "Loaded {} unique sentences from {}",
        sentences.len(),
        path.display()
    );
    Ok(sentences)
}
