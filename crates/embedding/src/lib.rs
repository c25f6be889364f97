//! # Textclust Embedding
//!
//! Pretrained word-vector store and sentence vectorization.
//!
//! The store is an external artifact loaded once at startup and treated as
//! immutable for the run. Two on-disk formats are supported:
//!
//! - a schema-versioned JSON store (`*.json`),
//! - the word2vec text format (`<count> <dim>` header, then one
//!   `token v1 .. vD` row per line).
//!
//! Sentence vectors are the arithmetic mean of per-token vectors; tokens the
//! store does not know contribute a zero vector and still count toward the
//! divisor.

mod error;
mod store;
mod vectorizer;

pub use error::{EmbeddingError, Result};
pub use store::{EmbeddingStore, EMBEDDING_STORE_SCHEMA_VERSION};
pub use vectorizer::{sentence_vector, vectorize_all};
