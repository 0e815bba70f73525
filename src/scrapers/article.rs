//! Generic news article extraction.
//!
//! Turns one downloaded page into an [`ExtractedArticle`]. The heavy lifting
//! (finding the article container, cleaning it, reading title, byline,
//! publication time and lead image from the page metadata) is done by
//! `dom_smoothie`'s Readability port. This module only fills the gaps that
//! news pages commonly leave:
//!
//! | Field | Readability | Then |
//! |-------|-------------|------|
//! | title | metadata / `<title>` heuristics | an `<h1>` that matches the `<title>` wins |
//! | authors | `byline` | JSON-LD `author`; names split and cleaned |
//! | publish date | `published_time` | date in URL path first, `<time datetime>` last |
//! | text | cleaned `content` | only prose `<p>` paragraphs are kept |
//! | top image | `image` | first `<img>` in the cleaned content |
//!
//! Extraction is a pure function of the page URL and its HTML, so it can be
//! exercised against inline fixtures.

use super::{selector, JSON_LD};
use crate::models::ExtractedArticle;
use crate::nlp::stopwords;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dom_smoothie::{Article, Config, Readability};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

static META: Lazy<Selector> = Lazy::new(|| selector("meta"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img[src]"));
static TIME: Lazy<Selector> = Lazy::new(|| selector("time[datetime]"));

static TITLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(?:\||-|–|—|»|:)\s+").unwrap());
static BY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(?:written\s+)?by[:\s]+").unwrap());
static AUTHOR_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*(?:,|&|\||\band\b)\s*").unwrap());
static URL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/((?:19|20)\d{2})[/-](\d{1,2})[/-](\d{1,2})(?:[/-]|$)").unwrap());

const MAX_AUTHOR_WORDS: usize = 5;
const MIN_PARAGRAPH_STOPWORDS: usize = 2;
const MAX_ELEMENTS_TO_PARSE: usize = 9000;

/// Run Readability over the page; `None` when it finds no article at all.
fn readability(page_url: &Url, html: &str) -> Option<Article> {
    let cfg = Config {
        max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
        ..Default::default()
    };

    let mut readability = match Readability::new(html, Some(page_url.as_str()), Some(cfg)) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "Readability could not load page");
            return None;
        }
    };
    match readability.parse() {
        Ok(article) => Some(article),
        Err(e) => {
            debug!(error = %e, "Readability found no article");
            None
        }
    }
}

/// Extract article fields from a downloaded page.
///
/// Missing fields are left empty; callers decide whether an empty `text`
/// means the page was not an article.
#[instrument(level = "info", skip_all, fields(url = %page_url, bytes = html.len()))]
pub fn extract(page_url: &Url, html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);
    let json_ld = json_ld_nodes(&document);
    let parsed = readability(page_url, html);

    let content = parsed
        .as_ref()
        .map(|a| Html::parse_fragment(&a.content));

    let article = ExtractedArticle {
        title: extract_title(&document, parsed.as_ref().map(|a| a.title.as_str())),
        authors: extract_authors(parsed.as_ref().and_then(|a| a.byline.as_deref()), &json_ld),
        publish_date: extract_publish_date(
            page_url,
            &document,
            parsed.as_ref().and_then(|a| a.published_time.as_deref()),
        ),
        top_image: extract_top_image(
            page_url,
            parsed.as_ref().and_then(|a| a.image.as_deref()),
            content.as_ref(),
        ),
        text: content.as_ref().map(extract_text).unwrap_or_default(),
    };

    debug!(
        title = %article.title,
        authors = ?article.authors,
        publish_date = ?article.publish_date,
        text_len = article.text.len(),
        has_image = !article.top_image.is_empty(),
        "Extracted article fields"
    );
    article
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

fn element_text(el: ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

/// All JSON-LD objects on the page, with top-level arrays and `@graph`
/// containers flattened.
fn json_ld_nodes(document: &Html) -> Vec<Value> {
    fn flatten(value: Value, out: &mut Vec<Value>) {
        match value {
            Value::Array(items) => items.into_iter().for_each(|v| flatten(v, out)),
            Value::Object(mut map) => {
                if let Some(graph) = map.remove("@graph") {
                    flatten(graph, out);
                }
                out.push(Value::Object(map));
            }
            _ => {}
        }
    }

    let mut nodes = Vec::new();
    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let raw = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            flatten(value, &mut nodes);
        }
    }
    nodes
}

fn has_meta(document: &Html, key: &str) -> bool {
    document.select(&META).any(|meta| {
        let el = meta.value();
        ["property", "name"]
            .into_iter()
            .filter_map(|attr| el.attr(attr))
            .any(|v| v.trim().eq_ignore_ascii_case(key))
            && el.attr("content").is_some_and(|c| !c.trim().is_empty())
    })
}

/// Readability's title, unless the page's `<h1>` is the `<title>` itself or
/// one of its separator-delimited pieces. An explicit `og:title` is trusted.
fn extract_title(document: &Html, readability_title: Option<&str>) -> String {
    let readability_title = readability_title
        .map(normalize_whitespace)
        .filter(|t| !t.is_empty());

    if has_meta(document, "og:title") {
        if let Some(title) = readability_title {
            return title;
        }
    }

    let h1 = document
        .select(&H1)
        .map(element_text)
        .find(|t| !t.is_empty());
    let raw = document
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    if let (Some(h1), Some(raw)) = (&h1, &raw) {
        if h1.eq_ignore_ascii_case(raw) {
            return raw.clone();
        }
        if TITLE_SEPARATOR
            .split(raw)
            .map(str::trim)
            .any(|piece| piece.eq_ignore_ascii_case(h1))
        {
            return h1.clone();
        }
    }

    readability_title.or(h1).or(raw).unwrap_or_default()
}

/// Names from a JSON-LD `author` value: a string, a `{ "name": .. }`
/// object, or an array of either.
fn json_ld_author_names(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(Value::as_str) {
                out.push(name.to_string());
            }
        }
        Value::Array(items) => items.iter().for_each(|v| json_ld_author_names(v, out)),
        _ => {}
    }
}

fn extract_authors(byline: Option<&str>, json_ld: &[Value]) -> Vec<String> {
    let mut raw = byline
        .filter(|b| !b.trim().is_empty() && !b.trim_start().starts_with("http"))
        .map(|b| vec![b.to_string()])
        .unwrap_or_default();

    if raw.is_empty() {
        for node in json_ld {
            if let Some(author) = node.get("author") {
                json_ld_author_names(author, &mut raw);
            }
        }
    }

    clean_authors(raw)
}

/// Strip "By" prefixes, split joined bylines, drop things that are not
/// plausibly a person's name, and de-duplicate keeping first occurrence.
fn clean_authors(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .map(|s| BY_PREFIX.replace(s.trim(), "").into_owned())
        .flat_map(|s| {
            AUTHOR_SPLIT
                .split(&s)
                .map(normalize_whitespace)
                .collect_vec()
        })
        .filter(|name| {
            let words = name.split_whitespace().count();
            words > 0
                && words <= MAX_AUTHOR_WORDS
                && !name.contains("http")
                && !name.chars().any(|c| c.is_ascii_digit())
        })
        .unique_by(|name| name.to_lowercase())
        .collect()
}

/// Parse the date formats commonly found in article metadata.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn date_from_url(url: &Url) -> Option<NaiveDate> {
    let caps = URL_DATE.captures(url.path())?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn extract_publish_date(
    page_url: &Url,
    document: &Html,
    published_time: Option<&str>,
) -> Option<NaiveDate> {
    date_from_url(page_url)
        .or_else(|| published_time.and_then(parse_date))
        .or_else(|| {
            document
                .select(&TIME)
                .filter_map(|t| t.value().attr("datetime"))
                .find_map(parse_date)
        })
}

fn is_prose(paragraph: &str) -> bool {
    stopwords::count(paragraph) >= MIN_PARAGRAPH_STOPWORDS
}

/// Prose paragraphs of the cleaned article, joined by blank lines.
fn extract_text(content: &Html) -> String {
    content
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|p| is_prose(p))
        .join("\n\n")
}

fn resolve_image(page_url: &Url, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    page_url.join(src).ok().map(|u| u.to_string())
}

fn extract_top_image(page_url: &Url, meta_image: Option<&str>, content: Option<&Html>) -> String {
    meta_image
        .and_then(|src| resolve_image(page_url, src))
        .or_else(|| {
            content?
                .select(&IMG)
                .filter_map(|img| img.value().attr("src"))
                .find_map(|src| resolve_image(page_url, src))
        })
        .unwrap_or_default()
}
