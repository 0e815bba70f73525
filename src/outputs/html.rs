//! Server-rendered HTML for the SnapNews page.
//!
//! The whole UI is one page: a URL form, a source selector, and whichever
//! result the last action produced. [`Page`] implements `Display`, so
//! rendering is `page.to_string()`.
//!
//! Every value that came from a user or a scraped page is escaped with
//! [`escape_html`] before it is written.

use crate::dispatch::{ArticleOutcome, ListingOutcome, SingleOutcome};
use crate::models::ArticleSummary;
use crate::scrapers::sources::NewsSource;
use crate::utils::escape_html;
use std::fmt::{self, Write};

const PRIMARY_COLOR: &str = "#9d03fc";

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", Helvetica, Arial, sans-serif; margin: 0; background: #ffffff; color: #262730; }
main { max-width: 46rem; margin: 0 auto; padding: 2rem 1rem 4rem; }
img.banner { width: 100%; border-radius: 0.5rem; }
label { display: block; margin: 1rem 0 0.25rem; font-size: 0.9rem; }
input[type=text], select { width: 100%; box-sizing: border-box; padding: 0.5rem; font-size: 1rem; border: 1px solid #d0d0d8; border-radius: 0.4rem; }
button { margin-top: 0.75rem; padding: 0.5rem 1rem; font-size: 1rem; color: #ffffff; background: PRIMARY; border: 0; border-radius: 0.4rem; cursor: pointer; }
.error { margin: 1rem 0; padding: 0.75rem 1rem; color: #7d1a1a; background: #ffe8e8; border-radius: 0.4rem; }
.spinner { width: 1.5rem; height: 1.5rem; margin: 1rem auto; border: 0.25rem solid #eee; border-top-color: PRIMARY; border-radius: 50%; animation: spin 0.8s linear infinite; }
.spinner[hidden] { display: none; }
@keyframes spin { to { transform: rotate(360deg); } }
figure { margin: 1rem 0; }
figcaption { font-size: 0.85rem; color: #6b6b7b; text-align: center; }
a { color: PRIMARY; }
"#;

const SCRIPT: &str = r#"
document.getElementById("source").addEventListener("change", function (e) {
  var button = document.getElementById("top_button");
  button.textContent = button.dataset.prefix + e.target.value;
});
document.querySelectorAll("form").forEach(function (form) {
  form.addEventListener("submit", function () {
    document.getElementById("spinner").hidden = false;
  });
});
"#;

/// Everything needed to render the page once.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Value echoed back into the URL field.
    pub url_input: &'a str,
    /// Source preselected in the selector.
    pub selected: NewsSource,
    /// How many articles the listing action summarizes.
    pub top_n: usize,
    pub single: Option<&'a SingleOutcome>,
    pub listing: Option<&'a ListingOutcome>,
}

impl<'a> Page<'a> {
    /// The page as first served: empty form, no results.
    pub fn blank(top_n: usize) -> Self {
        Self {
            url_input: "",
            selected: NewsSource::default(),
            top_n,
            single: None,
            listing: None,
        }
    }
}

/// Images are only emitted for http(s) URLs.
fn displayable_image(src: &str) -> Option<String> {
    let lower = src.trim().to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then(|| escape_html(src.trim()))
}

/// Summary sentences are newline-separated; keep them on separate lines.
fn summary_html(summary: &str) -> String {
    summary
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>\n")
}

fn write_error(f: &mut impl Write, message: &str) -> fmt::Result {
    writeln!(f, r#"<div class="error">{}</div>"#, escape_html(message))
}

fn write_article(f: &mut impl Write, url: &str, article: &ArticleSummary) -> fmt::Result {
    writeln!(f, r#"<section class="result">"#)?;
    writeln!(f, "<h3>Summary:</h3>")?;
    writeln!(f, "<p>{}</p>", summary_html(&article.summary))?;

    writeln!(f, "<h3>Details:</h3>")?;
    writeln!(f, "<p><strong>Title:</strong> {}</p>", escape_html(&article.title))?;
    writeln!(f, "<p><strong>Authors:</strong> {}</p>", escape_html(&article.authors))?;
    writeln!(
        f,
        "<p><strong>Publish Date:</strong> {}</p>",
        escape_html(&article.publish_date)
    )?;

    if let Some(src) = displayable_image(&article.top_image) {
        writeln!(
            f,
            r#"<figure><img src="{src}" alt="Top Image" style="width: 100%"><figcaption>Top Image</figcaption></figure>"#
        )?;
    }

    writeln!(f, "<p><strong>Sentiment:</strong> {}</p>", article.sentiment)?;

    writeln!(f, "<h3>Original Article:</h3>")?;
    writeln!(
        f,
        r#"<p>You can read the full article <a href="{}" target="_blank" rel="noopener">here</a>.</p>"#,
        escape_html(url)
    )?;
    writeln!(f, "</section>")
}

fn write_listing_item(f: &mut impl Write, item: &ArticleOutcome) -> fmt::Result {
    let Some(article) = &item.article else {
        return write_error(f, &item.failure_message());
    };

    writeln!(f, r#"<section class="result">"#)?;
    writeln!(f, "<h3>{}</h3>", escape_html(&article.title))?;
    writeln!(f, "<p><strong>URL:</strong> {}</p>", escape_html(&item.url))?;
    writeln!(f, "<p>{}</p>", summary_html(&article.summary))?;
    if let Some(src) = displayable_image(&article.top_image) {
        writeln!(
            f,
            r#"<figure><img src="{src}" alt="Top Image" width="300"><figcaption>Top Image</figcaption></figure>"#
        )?;
    }
    writeln!(f, "</section>")
}

fn write_single(f: &mut impl Write, outcome: &SingleOutcome) -> fmt::Result {
    match outcome {
        SingleOutcome::Summarized { url, article } => write_article(f, url, article),
        other => match other.error_message() {
            Some(message) => write_error(f, message),
            None => Ok(()),
        },
    }
}

fn write_listing(f: &mut impl Write, outcome: &ListingOutcome) -> fmt::Result {
    match outcome {
        ListingOutcome::FetchFailed { source } => {
            write_error(f, &ListingOutcome::fetch_failed_message(source))
        }
        ListingOutcome::Articles { items, .. } => {
            items.iter().try_for_each(|item| write_listing_item(f, item))
        }
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let button_prefix = format!("Summarize Top {} Articles from ", self.top_n);

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#)?;
        writeln!(f, "<title>SnapNews</title>")?;
        writeln!(f, r#"<link rel="icon" href="/static/logo_news.png">"#)?;
        writeln!(f, "<style>{}</style>", STYLE.replace("PRIMARY", PRIMARY_COLOR))?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<main>")?;
        writeln!(f, r#"<img class="banner" src="/static/banner.jpg" alt="SnapNews">"#)?;
        writeln!(f, "<h2>AI-Summarized news articles :</h2>")?;

        writeln!(f, r#"<form method="post" action="/summarize">"#)?;
        writeln!(f, r#"<label for="url">Enter URL here</label>"#)?;
        writeln!(
            f,
            r#"<input type="text" id="url" name="url" placeholder="https://news_link_example.com/search" value="{}">"#,
            escape_html(self.url_input)
        )?;
        writeln!(f, r#"<button type="submit">Summarize Article</button>"#)?;
        writeln!(f, "</form>")?;

        writeln!(f, r#"<div id="spinner" class="spinner" hidden></div>"#)?;

        if let Some(single) = self.single {
            write_single(f, single)?;
        }

        writeln!(f, "<h2>Select a news source:</h2>")?;
        writeln!(f, r#"<form method="post" action="/top">"#)?;
        writeln!(f, r#"<label for="source">News source</label>"#)?;
        writeln!(f, r#"<select id="source" name="source">"#)?;
        for source in NewsSource::ALL {
            let selected = if source == self.selected { " selected" } else { "" };
            writeln!(f, r#"<option value="{source}"{selected}>{source}</option>"#)?;
        }
        writeln!(f, "</select>")?;
        writeln!(
            f,
            r#"<button type="submit" id="top_button" data-prefix="{button_prefix}">{button_prefix}{}</button>"#,
            self.selected
        )?;
        writeln!(f, "</form>")?;

        if let Some(listing) = self.listing {
            write_listing(f, listing)?;
        }

        writeln!(f, "</main>")?;
        writeln!(f, "<script>{SCRIPT}</script>")?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{INVALID_URL_MESSAGE, SUMMARIZE_FAILED_MESSAGE};
    use crate::models::Sentiment;

    fn article(title: &str, image: &str) -> ArticleSummary {
        ArticleSummary {
            title: title.to_string(),
            authors: "Asha Menon, Ravi Kumar".to_string(),
            publish_date: "May 30, 2024".to_string(),
            summary: "First sentence.\nSecond sentence.".to_string(),
            top_image: image.to_string(),
            sentiment: Sentiment::Negative,
            polarity: -0.3,
        }
    }

    #[test]
    fn test_blank_page_has_both_forms() {
        let html = Page::blank(5).to_string();

        assert!(html.contains("<title>SnapNews</title>"));
        assert!(html.contains(r#"href="/static/logo_news.png""#));
        assert!(html.contains(r#"src="/static/banner.jpg""#));
        assert!(html.contains("AI-Summarized news articles :"));
        assert!(html.contains(r#"placeholder="https://news_link_example.com/search""#));
        assert!(html.contains("Summarize Article</button>"));
        assert!(html.contains("Select a news source:"));
        assert!(html.contains("Summarize Top 5 Articles from Indian Express</button>"));
        assert!(html.contains(PRIMARY_COLOR));
        for source in NewsSource::ALL {
            assert!(html.contains(&format!(r#"<option value="{source}""#)));
        }
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_single_article_render() {
        let outcome = SingleOutcome::Summarized {
            url: "https://example.com/a?x=1&y=2".to_string(),
            article: article("Floods <hit> Assam", "https://example.com/lead.jpg"),
        };
        let page = Page {
            url_input: "https://example.com/a?x=1&y=2",
            single: Some(&outcome),
            ..Page::blank(5)
        };
        let html = page.to_string();

        assert!(html.contains("<h3>Summary:</h3>"));
        assert!(html.contains("First sentence.<br>\nSecond sentence."));
        assert!(html.contains("<h3>Details:</h3>"));
        assert!(html.contains("Floods &lt;hit&gt; Assam"));
        assert!(html.contains("Asha Menon, Ravi Kumar"));
        assert!(html.contains("May 30, 2024"));
        assert!(html.contains(r#"src="https://example.com/lead.jpg" alt="Top Image" style="width: 100%""#));
        assert!(html.contains("<figcaption>Top Image</figcaption>"));
        assert!(html.contains("negative 😟"));
        assert!(html.contains(r#"<a href="https://example.com/a?x=1&amp;y=2""#));
        assert!(html.contains(">here</a>."));
        assert!(html.contains(r#"value="https://example.com/a?x=1&amp;y=2""#));
    }

    #[test]
    fn test_single_errors_render_their_messages() {
        let invalid = SingleOutcome::Invalid;
        let html = Page { single: Some(&invalid), ..Page::blank(5) }.to_string();
        assert!(html.contains(&escape_html(INVALID_URL_MESSAGE)));

        let failed = SingleOutcome::Failed;
        let html = Page { single: Some(&failed), ..Page::blank(5) }.to_string();
        assert!(html.contains(&escape_html(SUMMARIZE_FAILED_MESSAGE)));
    }

    #[test]
    fn test_listing_render_mixes_results_and_failures() {
        let outcome = ListingOutcome::Articles {
            source: NewsSource::IndiaToday,
            items: vec![
                ArticleOutcome {
                    url: "https://www.indiatoday.in/india/story/one".to_string(),
                    article: Some(article("Story one", "https://img.example.com/1.jpg")),
                },
                ArticleOutcome {
                    url: "https://www.indiatoday.in/india/story/two".to_string(),
                    article: None,
                },
            ],
        };
        let page = Page {
            selected: NewsSource::IndiaToday,
            listing: Some(&outcome),
            ..Page::blank(5)
        };
        let html = page.to_string();

        assert!(html.contains("<h3>Story one</h3>"));
        assert!(html.contains("https://www.indiatoday.in/india/story/one"));
        assert!(html.contains(r#"width="300""#));
        assert!(html.contains("Failed to summarize article: https://www.indiatoday.in/india/story/two"));
        assert!(html.contains(r#"<option value="India Today" selected>"#));
        assert!(html.contains("Summarize Top 5 Articles from India Today</button>"));
    }

    #[test]
    fn test_listing_fetch_failure() {
        let outcome = ListingOutcome::FetchFailed {
            source: "Times of India".to_string(),
        };
        let html = Page { listing: Some(&outcome), ..Page::blank(5) }.to_string();
        assert!(html.contains("Failed to fetch top articles from Times of India."));
    }

    #[test]
    fn test_non_http_images_are_dropped() {
        let outcome = SingleOutcome::Summarized {
            url: "https://example.com/a".to_string(),
            article: article("Title", "javascript:alert(1)"),
        };
        let html = Page { single: Some(&outcome), ..Page::blank(5) }.to_string();
        assert!(!html.contains("javascript:alert"));
        assert!(!html.contains("<figcaption>"));
    }
}
