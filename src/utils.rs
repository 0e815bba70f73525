//! Utility functions for URL checks, date formatting and string handling.
//!
//! This module provides helper functions used throughout the application:
//! - URL validation for user input
//! - Site-name extraction used as the author fallback
//! - Publish-date formatting for display
//! - String truncation for logging and HTML escaping for rendering
//! - Startup checks on the static assets directory

use crate::error::UrlError;
use chrono::NaiveDate;
use std::path::Path;
use tracing::instrument;
use url::Url;

/// Check whether user input is a well-formed absolute URL.
///
/// A URL is accepted when it parses and has both a scheme and a non-empty
/// host. Surrounding whitespace is ignored. No network access happens here.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/news/1"));
/// assert!(!is_valid_url("not a url"));
/// assert!(!is_valid_url("mailto:desk@example.com"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Extract the website name from a URL.
///
/// Returns the lowercased host with exactly one leading `www.` removed. This
/// is used as the attribution when an article carries no byline.
///
/// # Errors
///
/// Returns [`UrlError`] if the URL does not parse or has no host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(website_name("https://www.example.com/a")?, "example.com");
/// assert_eq!(website_name("https://example.com")?, "example.com");
/// ```
#[instrument(level = "debug", err)]
pub fn website_name(url: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(url.trim())?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))?
        .to_lowercase();

    Ok(match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    })
}

/// Format a publication date for display.
///
/// Dates render as `"Month DD, YYYY"` (e.g. `"May 06, 2024"`); a missing
/// date renders as `"N/A"`.
pub fn format_publish_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%B %d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Escape text for safe inclusion in HTML element content or attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Names from `files` that do not exist as regular files under `dir`.
///
/// Used at startup to warn about a missing icon or banner; the page still
/// renders without them.
pub fn missing_assets(dir: &Path, files: &[&str]) -> Vec<String> {
    files
        .iter()
        .filter(|name| !dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url_accepts_scheme_and_host() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://www.example.com/news/2024/05/06/story"));
        assert!(is_valid_url("http://127.0.0.1:8080/a?b=c"));
        assert!(is_valid_url("ftp://files.example.org/pub"));
        assert!(is_valid_url("  https://example.com/padded  "));
    }

    #[test]
    fn test_is_valid_url_rejects_missing_scheme_or_host() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com/news"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("mailto:desk@example.com"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_website_name_strips_www() {
        assert_eq!(website_name("https://www.example.com/a").unwrap(), "example.com");
        assert_eq!(website_name("https://example.com").unwrap(), "example.com");
        assert_eq!(website_name("https://WWW.Example.COM/x").unwrap(), "example.com");
    }

    #[test]
    fn test_website_name_strips_exactly_one_www() {
        assert_eq!(
            website_name("https://www.www.example.com/").unwrap(),
            "www.example.com"
        );
        assert_eq!(
            website_name("https://timesofindia.indiatimes.com/india").unwrap(),
            "timesofindia.indiatimes.com"
        );
    }

    #[test]
    fn test_website_name_is_idempotent() {
        let once = website_name("https://www.example.com/a").unwrap();
        let twice = website_name(&format!("https://{once}/")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_website_name_errors_instead_of_returning_garbage() {
        assert!(matches!(website_name("not a url"), Err(UrlError::Parse(_))));
        assert!(matches!(
            website_name("mailto:desk@example.com"),
            Err(UrlError::MissingHost(_))
        ));
    }

    #[test]
    fn test_format_publish_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(format_publish_date(Some(date)), "May 06, 2024");
        assert_eq!(format_publish_date(None), "N/A");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert!(result.starts_with('é'));
        assert!(result.contains("(+18 bytes)"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_missing_assets() {
        let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
        assert_eq!(missing_assets(&src, &["main.rs", "banner.jpg"]), vec!["banner.jpg"]);
        assert_eq!(
            missing_assets(Path::new("/nonexistent/assets"), &["logo_news.png"]),
            vec!["logo_news.png"]
        );
    }
}
