use crate::error::{EmbeddingError, Result};
use crate::store::EmbeddingStore;
use textclust_corpus::TokenSequence;

/// Computes one sentence vector as the arithmetic mean of per-token vectors.
///
/// A token missing from the store contributes a zero vector and still counts
/// toward the divisor, so a sentence made entirely of unknown tokens maps to
/// the origin. An empty token slice is a defined error rather than a NaN
/// vector.
pub fn sentence_vector(store: &EmbeddingStore, tokens: &[String]) -> Result<Vec<f32>> {
    if tokens.is_empty() {
        return Err(EmbeddingError::EmptySentence);
    }

    let mut sum = vec![0.0f32; store.dimension()];
    for token in tokens {
        match store.lookup(token) {
            Some(vector) => {
                for (acc, value) in sum.iter_mut().zip(vector) {
                    *acc += value;
                }
            }
            None => log::debug!("Token not in embedding store: {token:?}"),
        }
    }

    let count = tokens.len() as f32;
    for value in &mut sum {
        *value /= count;
    }
    Ok(sum)
}

/// Vectorizes every sentence, index-aligned with the input.
pub fn vectorize_all(
    store: &EmbeddingStore,
    sentences: &[TokenSequence],
) -> Result<Vec<Vec<f32>>> {
    sentences
        .iter()
        .map(|sentence| sentence_vector(store, sentence.tokens()))
        .collect()
}
