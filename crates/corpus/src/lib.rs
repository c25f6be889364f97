//! # Textclust Corpus
//!
//! Sentence loading and tokenization seams for title clustering.
//!
//! A corpus is a plain text file with one candidate sentence per line. The
//! loader trims each line, hands it to a [`Segmenter`], and deduplicates
//! identical tokenizations while preserving first-seen order, so the rest of
//! the pipeline works on a stable, duplicate-free list of [`TokenSequence`]s.

mod error;
mod loader;
mod segmenter;

pub use error::{CorpusError, Result};
pub use loader::{load_titles, TokenSequence};
pub use segmenter::{Segmenter, UnicodeSegmenter, WhitespaceSegmenter};
