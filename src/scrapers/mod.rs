//! Page scraping: article extraction and homepage crawling.
//!
//! Both halves follow the same two-phase pattern used for every source:
//!
//! 1. **Indexing**: Discover article URLs from a source's homepage ([`listing`])
//! 2. **Extraction**: Pull structured fields out of one article page ([`article`])
//!
//! # Supported Sources
//!
//! | Source | Homepage |
//! |--------|----------|
//! | Indian Express | `indianexpress.com` |
//! | Round Table India | `roundtableindia.co.in` (gender perspective category) |
//! | Times of India | `timesofindia.indiatimes.com` |
//! | India Today | `indiatoday.in` |
//!
//! Any other site works for single-article extraction; the generic heuristics
//! in [`article`] do not depend on a source.
//!
//! # Common Patterns
//!
//! - Pages are parsed with `scraper`; selectors are compile-time constants
//! - Metadata is read from JSON-LD and `<meta>` tags before falling back to markup
//! - Extraction functions are pure over `(url, html)` so they can be tested offline

pub mod article;
pub mod listing;
pub mod sources;

use once_cell::sync::Lazy;
use scraper::Selector;

/// Parse a selector that is known to be valid at compile time.
pub(crate) fn selector(css: &'static str) -> Selector {
    match Selector::parse(css) {
        Ok(s) => s,
        Err(e) => panic!("invalid built-in selector {css:?}: {e}"),
    }
}

pub(crate) static JSON_LD: Lazy<Selector> =
    Lazy::new(|| selector("script[type='application/ld+json']"));
