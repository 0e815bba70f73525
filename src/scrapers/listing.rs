//! Homepage crawling: discover article URLs linked from a source's homepage.
//!
//! The homepage is fetched once and every `<a href>` is resolved against it.
//! Links are kept in discovery order when they stay on the source's site and
//! look like story pages rather than section fronts, tag pages or utility
//! pages.
//!
//! # What counts as a story URL
//!
//! - a date in the path (`/2024/05/06/...`, `2024-05-06`)
//! - a long numeric id (`/articleshow/110123456.cms`, `...-2548901`)
//! - a slug of at least four words (`/india/floods-hit-assam-again/`)

use super::selector;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

static DATE_IN_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:19|20)\d{2}[/-]\d{1,2}[/-]\d{1,2}").unwrap());
static LONG_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,}").unwrap());

const MIN_SLUG_WORDS: usize = 4;

/// Path segments that mark non-article pages.
const SKIP_SEGMENTS: &[&str] = &[
    "about",
    "about-us",
    "advertise",
    "author",
    "authors",
    "careers",
    "category",
    "contact",
    "contact-us",
    "feed",
    "gallery",
    "help",
    "live-tv",
    "login",
    "newsletter",
    "photo",
    "photos",
    "podcast",
    "privacy",
    "privacy-policy",
    "register",
    "rss",
    "search",
    "signup",
    "subscribe",
    "subscription",
    "tag",
    "tags",
    "terms",
    "topic",
    "video",
    "videos",
];

/// Query parameters that only track where a click came from.
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid"];

const PAGE_EXTENSIONS: &[&str] = &["html", "htm", "cms", "ece", "php", "asp", "aspx", "shtml"];

fn bare_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    })
}

/// True when `link` is on the same site as `homepage` or one of its
/// subdomains, ignoring a leading `www.` on either.
fn same_site(homepage: &Url, link: &Url) -> bool {
    match (bare_host(homepage), bare_host(link)) {
        (Some(base), Some(host)) => {
            host == base || host.ends_with(&format!(".{base}"))
        }
        _ => false,
    }
}

/// Decide whether a resolved URL looks like a single story page.
pub(crate) fn is_article_url(homepage: &Url, link: &Url) -> bool {
    if !matches!(link.scheme(), "http" | "https") || !same_site(homepage, link) {
        return false;
    }

    let path = link.path().trim_end_matches('/');
    if path.is_empty() || path == homepage.path().trim_end_matches('/') {
        return false;
    }

    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect_vec();
    if segments
        .iter()
        .any(|s| SKIP_SEGMENTS.contains(&s.as_str()))
    {
        return false;
    }

    let Some(last) = segments.last() else {
        return false;
    };
    let (stem, extension) = match last.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (last.as_str(), None),
    };
    if let Some(ext) = extension {
        if !PAGE_EXTENSIONS.contains(&ext) {
            return false;
        }
    }

    let slug_words = stem
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .count();

    DATE_IN_PATH.is_match(path) || LONG_ID.is_match(path) || slug_words >= MIN_SLUG_WORDS
}

fn is_tracking_param(key: &str) -> bool {
    key.to_ascii_lowercase().starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

/// Drop the fragment and click-tracking query parameters.
fn strip_tracking(mut url: Url) -> Url {
    url.set_fragment(None);
    if url.query().is_some() {
        let kept = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect_vec();
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }
    url
}

/// Identity of a story page: host without `www.`, path without a trailing
/// slash, and whatever query survives [`strip_tracking`].
fn dedupe_key(url: &Url) -> String {
    format!(
        "{}{}?{}",
        bare_host(url).unwrap_or_default(),
        url.path().trim_end_matches('/'),
        url.query().unwrap_or_default()
    )
}

/// Extract up to `limit` distinct article URLs from a homepage, in the order
/// they appear.
#[instrument(level = "info", skip_all, fields(homepage = %homepage, limit = limit))]
pub fn article_urls(homepage: &Url, html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    let urls = document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| homepage.join(href.trim()).ok())
        .map(strip_tracking)
        .filter(|url| is_article_url(homepage, url))
        .unique_by(dedupe_key)
        .take(limit)
        .map(|url| url.to_string())
        .collect_vec();

    info!(count = urls.len(), source = %homepage, "Indexed article URLs");
    debug!(urls = ?urls, "Article URLs");
    urls
}
