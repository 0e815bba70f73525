//! Extractive summarization.
//!
//! Sentences are scored and the best few are returned in their original
//! order. A sentence's score combines:
//!
//! - **Title overlap**: share of the headline's content words it contains
//! - **Keyword frequency**: how densely it uses the article's top keywords,
//!   both summed and weighted by proximity between keyword hits
//! - **Length**: closeness to an ideal of 20 words
//! - **Position**: a fixed weight per tenth of the article
//!
//! ```text
//! score = (title * 1.5 + frequency * 2.0 + length + position) / 4
//! ```

use super::stopwords::is_stopword;
use super::{sentences, words};
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, instrument};

const IDEAL_SENTENCE_WORDS: f64 = 20.0;
const KEYWORD_COUNT: usize = 10;

/// Summarize `text`, using `title` to favor on-topic sentences.
///
/// Returns at most `max_sentences` sentences, one per line, in the order they
/// appear in the article. Empty text yields an empty summary.
#[instrument(level = "debug", skip_all, fields(max_sentences = max_sentences, text_len = text.len()))]
pub fn summarize(title: &str, text: &str, max_sentences: usize) -> String {
    let sentences = sentences(text);
    if sentences.is_empty() || max_sentences == 0 {
        return String::new();
    }

    let keywords = keywords(text);
    let title_words = content_words(title);
    let total = sentences.len();

    let ranked = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let sentence_words = words(sentence);
            let title = title_score(&title_words, &sentence_words);
            let sbs = sbs(&sentence_words, &keywords);
            let dbs = dbs(&sentence_words, &keywords);
            let frequency = (sbs + dbs) / 2.0 * 10.0;
            let length = length_score(sentence_words.len());
            let position = position_score(i + 1, total);
            let score = (title * 1.5 + frequency * 2.0 + length + position) / 4.0;
            (i, score)
        })
        .sorted_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)))
        .take(max_sentences)
        .map(|(i, _)| i)
        .sorted()
        .collect_vec();

    debug!(picked = ?ranked, total, "Selected summary sentences");
    ranked.into_iter().map(|i| sentences[i].as_str()).join("\n")
}

/// The most frequent non-stopwords, each scored by relative frequency.
fn keywords(text: &str) -> HashMap<String, f64> {
    let all = words(text);
    if all.is_empty() {
        return HashMap::new();
    }
    let total = all.len() as f64;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for w in all.into_iter().filter(|w| !is_stopword(w)) {
        *counts.entry(w).or_default() += 1;
    }

    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(KEYWORD_COUNT)
        .map(|(w, freq)| (w, freq as f64 / total * 1.5 + 1.0))
        .collect()
}

fn content_words(text: &str) -> Vec<String> {
    words(text).into_iter().filter(|w| !is_stopword(w)).collect()
}

fn title_score(title_words: &[String], sentence_words: &[String]) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let hits = sentence_words
        .iter()
        .filter(|w| !is_stopword(w) && title_words.contains(w))
        .count();
    hits as f64 / title_words.len() as f64
}

fn length_score(word_count: usize) -> f64 {
    1.0 - (IDEAL_SENTENCE_WORDS - word_count as f64).abs() / IDEAL_SENTENCE_WORDS
}

/// Weight for the `i`-th sentence (1-based) of `size`.
fn position_score(i: usize, size: usize) -> f64 {
    let normalized = i as f64 / size as f64;
    match normalized {
        n if n > 0.0 && n <= 0.1 => 0.17,
        n if n > 0.1 && n <= 0.2 => 0.23,
        n if n > 0.2 && n <= 0.3 => 0.14,
        n if n > 0.3 && n <= 0.4 => 0.08,
        n if n > 0.4 && n <= 0.5 => 0.05,
        n if n > 0.5 && n <= 0.6 => 0.04,
        n if n > 0.6 && n <= 0.7 => 0.06,
        n if n > 0.7 && n <= 0.8 => 0.04,
        n if n > 0.8 && n <= 0.9 => 0.04,
        n if n > 0.9 && n <= 1.0 => 0.15,
        _ => 0.0,
    }
}

/// Summation-based keyword score.
fn sbs(sentence_words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    if sentence_words.is_empty() {
        return 0.0;
    }
    let sum: f64 = sentence_words.iter().filter_map(|w| keywords.get(w)).sum();
    sum / sentence_words.len() as f64 / 10.0
}

/// Density-based keyword score: adjacent keyword hits close together score
/// higher than hits spread across the sentence.
fn dbs(sentence_words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    let hits = sentence_words
        .iter()
        .enumerate()
        .filter_map(|(i, w)| keywords.get(w).map(|score| (i, *score)))
        .collect_vec();
    if hits.is_empty() {
        return 0.0;
    }

    let sum: f64 = hits
        .iter()
        .tuple_windows()
        .map(|((i, a), (j, b))| {
            let dist = (j - i) as f64;
            a * b / (dist * dist)
        })
        .sum();

    let distinct = hits
        .iter()
        .map(|(i, _)| &sentence_words[*i])
        .unique()
        .count() as f64;
    let k = distinct + 1.0;
    sum / (k * (k + 1.0))
}
