//! Data models for extracted and summarized news articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ExtractedArticle`]: Structured fields pulled out of a downloaded page
//! - [`ArticleSummary`]: The display-ready result of one pipeline run
//! - [`Sentiment`]: The three-way label derived from a polarity score
//!
//! Nothing here is persisted. Every value is built per request and dropped
//! once the response has been rendered.

use chrono::NaiveDate;
use serde::Serialize;

/// Article fields as parsed from a page, before any formatting.
///
/// This is what the extractor hands to the pipeline. Fields that a page does
/// not provide are left empty (or `None` for the date); the pipeline decides
/// how to present them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedArticle {
    /// The headline.
    pub title: String,
    /// Byline names in page order, without duplicates.
    pub authors: Vec<String>,
    /// Publication date, if one could be found in the URL or the markup.
    pub publish_date: Option<NaiveDate>,
    /// Body paragraphs joined by blank lines.
    pub text: String,
    /// Absolute URL of the lead image, or empty.
    pub top_image: String,
}

/// Sentiment label selected by the sign of a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a polarity to a label: above zero is positive, below zero is
    /// negative, exactly zero is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😟",
            Sentiment::Neutral => "😐",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.glyph())
    }
}

/// The result of one successful pipeline run.
///
/// Every field is ready for display: authors are already joined (or replaced
/// by the site name), and the date is already formatted.
///
/// # JSON
///
/// Serialized with camelCase keys for the `/api` routes, e.g.
/// `{"title": "...", "publishDate": "May 06, 2024", "sentiment": "positive", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    /// The article headline.
    pub title: String,
    /// Comma-joined byline, or the site name when the page has no byline.
    pub authors: String,
    /// `"Month DD, YYYY"` or `"N/A"`.
    pub publish_date: String,
    /// Extractive summary, one sentence per line.
    pub summary: String,
    /// Lead image URL, possibly empty.
    pub top_image: String,
    pub sentiment: Sentiment,
    /// Raw polarity score behind `sentiment`, in `[-1, 1]`.
    pub polarity: f64,
}
