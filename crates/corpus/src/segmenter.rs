use unicode_segmentation::UnicodeSegmentation;

/// External tokenization seam. The pipeline treats segmentation as a black
/// box: one raw line in, discrete tokens out.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Unicode word-boundary segmentation (UAX #29).
///
/// Splits CJK text into single-character tokens and alphabetic text into
/// words, dropping whitespace and punctuation. This is the default for raw
/// title corpora.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}

/// Whitespace segmentation for corpora that are already tokenized, one
/// sentence per line with tokens separated by spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}
