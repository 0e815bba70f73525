//! The article pipeline: one URL in, one [`ArticleSummary`] (or a failure) out.
//!
//! # Steps
//!
//! 1. **Download**: single GET with a timeout; non-2xx or transport errors fail
//! 2. **Extract**: title, authors, date, body text and lead image from the HTML
//! 3. **Attribute**: fall back to the site name when there is no byline
//! 4. **Format**: publish date as `"Month DD, YYYY"` or `"N/A"`
//! 5. **Summarize** the body and **score** its sentiment
//!
//! There are no retries and no caching. Every call is independent.

use crate::config::AppConfig;
use crate::error::{PipelineError, UrlError};
use crate::models::ArticleSummary;
use crate::nlp::{sentiment, summarize};
use crate::scrapers::{article, listing};
use crate::utils::{format_publish_date, truncate_for_log, website_name};
use reqwest::Client;
use std::time::Instant;
use tracing::{info, instrument, warn};
use url::Url;

/// The listing never summarizes more than this many articles per source.
pub const MAX_TOP_ARTICLES: usize = 5;

/// Shared, read-only pipeline settings plus the HTTP client.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: Client,
    summary_sentences: usize,
    max_articles: usize,
}

impl Pipeline {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.http.timeout())
            .user_agent(config.http.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            summary_sentences: config.summary.sentences,
            max_articles: config.listing.max_articles.min(MAX_TOP_ARTICLES),
        })
    }

    /// Upper bound on URLs returned by [`Pipeline::top_articles`].
    pub fn max_articles(&self) -> usize {
        self.max_articles
    }

    /// GET a page, failing on transport errors and non-success statuses.
    async fn download(&self, url: &Url) -> Result<String, PipelineError> {
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Run the full pipeline for one article URL.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the URL cannot be fetched, the page has
    /// no extractable article text, or the URL has no usable host.
    #[instrument(level = "info", skip(self))]
    pub async fn summarize_article(&self, url: &str) -> Result<ArticleSummary, PipelineError> {
        let t0 = Instant::now();
        let page_url = Url::parse(url.trim()).map_err(UrlError::from)?;

        let html = self.download(&page_url).await?;
        let extracted = article::extract(&page_url, &html);

        if extracted.text.trim().is_empty() {
            return Err(PipelineError::Extraction(format!(
                "no article text found in page starting {:?}",
                truncate_for_log(html.trim(), 120)
            )));
        }

        let authors = if extracted.authors.is_empty() {
            website_name(page_url.as_str())?
        } else {
            extracted.authors.join(", ")
        };

        let summary = summarize::summarize(&extracted.title, &extracted.text, self.summary_sentences);
        let (sentiment, polarity) = sentiment::analyze(&extracted.text);

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            title = %extracted.title,
            %sentiment,
            polarity,
            "Summarized article"
        );

        Ok(ArticleSummary {
            title: extracted.title,
            authors,
            publish_date: format_publish_date(extracted.publish_date),
            summary,
            top_image: extracted.top_image,
            sentiment,
            polarity,
        })
    }

    /// Discover up to [`Pipeline::max_articles`] article URLs on a homepage.
    ///
    /// A homepage that cannot be fetched yields an empty list, exactly like a
    /// homepage with no article links.
    #[instrument(level = "info", skip(self), fields(homepage = %homepage))]
    pub async fn top_articles(&self, homepage: &Url) -> Vec<String> {
        match self.download(homepage).await {
            Ok(html) => listing::article_urls(homepage, &html, self.max_articles),
            Err(e) => {
                warn!(error = %e, "Failed to fetch homepage");
                Vec::new()
            }
        }
    }
}
