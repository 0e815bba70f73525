//! Turn user actions into pipeline calls and collect their outcomes.
//!
//! The two actions offered by the page are handled here, independently of
//! how their results are rendered:
//!
//! - **Single article**: validate the input, then run the pipeline once.
//! - **Top articles**: list a source's homepage, then run the pipeline for
//!   each discovered URL in turn, continuing past individual failures.
//!
//! Both HTML and JSON front ends render the outcome types defined here, so
//! the user-facing messages live here too.

use crate::models::ArticleSummary;
use crate::pipeline::Pipeline;
use crate::scrapers::sources::{NewsSource, SourceRegistry};
use crate::utils::{is_valid_url, truncate_for_log};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid URL or this news agency doesn't allow news parsing";

pub const SUMMARIZE_FAILED_MESSAGE: &str =
    "Failed to summarize the article. This news agency doesn't allow news parsing.";

/// Result of the single-article action.
#[derive(Debug)]
pub enum SingleOutcome {
    /// The input was not a URL; nothing was fetched.
    Invalid,
    /// The URL was valid but the pipeline failed.
    Failed,
    Summarized { url: String, article: ArticleSummary },
}

impl SingleOutcome {
    /// The message to show instead of an article, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            SingleOutcome::Invalid => Some(INVALID_URL_MESSAGE),
            SingleOutcome::Failed => Some(SUMMARIZE_FAILED_MESSAGE),
            SingleOutcome::Summarized { .. } => None,
        }
    }
}

/// One attempted article of a source listing.
#[derive(Debug)]
pub struct ArticleOutcome {
    pub url: String,
    /// `None` when the pipeline failed for this URL.
    pub article: Option<ArticleSummary>,
}

impl ArticleOutcome {
    pub fn failure_message(&self) -> String {
        format!("Failed to summarize article: {}", self.url)
    }
}

/// Result of the top-articles action.
#[derive(Debug)]
pub enum ListingOutcome {
    /// The source was unknown, its homepage could not be fetched, or it
    /// listed no articles.
    FetchFailed { source: String },
    Articles {
        source: NewsSource,
        items: Vec<ArticleOutcome>,
    },
}

impl ListingOutcome {
    pub fn fetch_failed_message(source: &str) -> String {
        format!("Failed to fetch top articles from {source}.")
    }
}

/// Validate `input` and, when it is a URL, summarize the article behind it.
#[instrument(level = "info", skip(pipeline), fields(input = %truncate_for_log(input, 200)))]
pub async fn summarize_single(pipeline: &Pipeline, input: &str) -> SingleOutcome {
    let url = input.trim();
    if !is_valid_url(url) {
        info!("Rejected input that is not a URL");
        return SingleOutcome::Invalid;
    }

    match pipeline.summarize_article(url).await {
        Ok(article) => SingleOutcome::Summarized {
            url: url.to_string(),
            article,
        },
        Err(e) => {
            warn!(%url, error = %e, "Failed to summarize article");
            SingleOutcome::Failed
        }
    }
}

/// Summarize the top articles of the source named `source_name`.
///
/// URLs are processed one at a time in discovery order; each failure is
/// recorded and the next URL is still attempted.
#[instrument(level = "info", skip(pipeline, registry))]
pub async fn summarize_top(
    pipeline: &Pipeline,
    registry: &SourceRegistry,
    source_name: &str,
) -> ListingOutcome {
    let Some((source, homepage)) = registry.lookup(source_name) else {
        warn!("Unknown news source");
        return ListingOutcome::FetchFailed {
            source: source_name.trim().to_string(),
        };
    };

    let urls = pipeline.top_articles(homepage).await;
    if urls.is_empty() {
        return ListingOutcome::FetchFailed {
            source: source.name().to_string(),
        };
    }

    let items = stream::iter(urls)
        .then(move |url| async move {
            let article = match pipeline.summarize_article(&url).await {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!(%url, error = %e, "Failed to summarize listed article");
                    None
                }
            };
            ArticleOutcome { url, article }
        })
        .collect::<Vec<_>>()
        .await;

    let ok = items.iter().filter(|i| i.article.is_some()).count();
    info!(%source, attempted = items.len(), summarized = ok, "Finished source listing");

    ListingOutcome::Articles { source, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{test_pipeline, NO_BYLINE_ARTICLE};
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_any_request() {
        let outcome = summarize_single(&test_pipeline(), "not a url").await;
        assert!(matches!(outcome, SingleOutcome::Invalid));
        assert_eq!(outcome.error_message(), Some(INVALID_URL_MESSAGE));
    }

    #[tokio::test]
    async fn test_unreachable_url_is_a_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let outcome = summarize_single(&test_pipeline(), &format!("{}/blocked", server.uri())).await;
        assert!(matches!(outcome, SingleOutcome::Failed));
        assert_eq!(outcome.error_message(), Some(SUMMARIZE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_single_article_keeps_trimmed_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/farmers-welcome-early-rains"))
            .respond_with(ResponseTemplate::new(200).set_body_string(NO_BYLINE_ARTICLE))
            .mount(&server)
            .await;

        let url = format!("{}/news/farmers-welcome-early-rains", server.uri());
        let outcome = summarize_single(&test_pipeline(), &format!("  {url} ")).await;
        match outcome {
            SingleOutcome::Summarized { url: got, article } => {
                assert_eq!(got, url);
                assert_eq!(article.authors, "127.0.0.1");
                assert_eq!(article.publish_date, "N/A");
            }
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_source_is_a_fetch_failure() {
        let outcome = summarize_top(&test_pipeline(), SourceRegistry::builtin(), "Daily Planet").await;
        assert!(matches!(outcome, ListingOutcome::FetchFailed { ref source } if source == "Daily Planet"));
    }

    #[tokio::test]
    async fn test_homepage_without_articles_is_a_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>No news</body></html>"))
            .mount(&server)
            .await;

        let registry = SourceRegistry::from_entries([(
            NewsSource::TimesOfIndia,
            Url::parse(&format!("{}/", server.uri())).unwrap(),
        )]);
        let outcome = summarize_top(&test_pipeline(), &registry, "Times of India").await;
        assert!(matches!(outcome, ListingOutcome::FetchFailed { ref source } if source == "Times of India"));
        assert_eq!(
            ListingOutcome::fetch_failed_message("Times of India"),
            "Failed to fetch top articles from Times of India."
        );
    }

    #[tokio::test]
    async fn test_partial_listing_attempts_every_candidate() {
        let server = MockServer::start().await;
        let good = ["/india/first-good-story-today", "/india/second-good-story-today"];
        let bad = [
            "/india/story-that-is-a-video-page",
            "/india/story-that-is-missing-now",
            "/india/story-that-needs-a-login",
        ];

        let links = good
            .iter()
            .chain(bad.iter())
            .map(|p| format!(r#"<a href="{p}">link</a>"#))
            .collect::<String>();
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("<html><body>{links}</body></html>")))
            .mount(&server)
            .await;

        for p in good {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(ResponseTemplate::new(200).set_body_string(NO_BYLINE_ARTICLE))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path(bad[0]))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><video></video></body></html>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(bad[1]))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(bad[2]))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let registry = SourceRegistry::from_entries([(
            NewsSource::IndiaToday,
            Url::parse(&format!("{}/", server.uri())).unwrap(),
        )]);
        let outcome = summarize_top(&test_pipeline(), &registry, "India Today").await;

        let ListingOutcome::Articles { source, items } = outcome else {
            panic!("expected articles");
        };
        assert_eq!(source, NewsSource::IndiaToday);
        assert_eq!(items.len(), 5);
        assert_eq!(items.iter().filter(|i| i.article.is_some()).count(), 2);
        assert!(items[0].url.ends_with(good[0]));
        assert!(items[1].url.ends_with(good[1]));
        for item in &items[2..] {
            assert!(item.article.is_none());
            assert_eq!(item.failure_message(), format!("Failed to summarize article: {}", item.url));
        }
    }
}
