//! Text processing: tokenization, extractive summaries and sentiment.
//!
//! # Submodules
//!
//! - [`stopwords`]: English stopword table shared by the extractor and summarizer
//! - [`summarize`]: Keyword-scored extractive summarization
//! - [`sentiment`]: Lexicon-based polarity scoring
//!
//! All tables are static and built on first use; nothing here touches the
//! network or the filesystem.

pub mod sentiment;
pub mod stopwords;
pub mod summarize;

use unicode_segmentation::UnicodeSegmentation;

/// Split text into lowercase word tokens.
///
/// Punctuation is dropped; apostrophes inside words are kept so that
/// contractions like `don't` stay a single token.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.to_lowercase().replace('’', "'"))
        .collect()
}

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
