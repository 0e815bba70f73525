//! JSON bodies for the `/api` routes.
//!
//! The API reports the same outcomes as the HTML page, with the same
//! messages, but as structured data with a status code:
//!
//! | Outcome | Status |
//! |---------|--------|
//! | summarized / listing with at least one attempt | `200 OK` |
//! | input is not a URL | `422 Unprocessable Entity` |
//! | pipeline or homepage fetch failed | `502 Bad Gateway` |
//!
//! # Example
//!
//! ```json
//! {
//!   "source": "India Today",
//!   "articles": [
//!     { "url": "https://www.indiatoday.in/...", "article": { "title": "...", "sentiment": "positive" } },
//!     { "url": "https://www.indiatoday.in/...", "error": "Failed to summarize article: https://..." }
//!   ]
//! }
//! ```

use crate::dispatch::{
    ArticleOutcome, ListingOutcome, SingleOutcome, INVALID_URL_MESSAGE, SUMMARIZE_FAILED_MESSAGE,
};
use crate::models::ArticleSummary;
use crate::scrapers::sources::SourceRegistry;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleBody {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ArticleOutcome> for ArticleBody {
    fn from(outcome: ArticleOutcome) -> Self {
        let error = outcome.article.is_none().then(|| outcome.failure_message());
        Self {
            url: outcome.url,
            article: outcome.article,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingBody {
    pub source: String,
    pub articles: Vec<ArticleBody>,
}

#[derive(Debug, Serialize)]
pub struct SourceBody {
    pub name: String,
    pub homepage: String,
}

/// Either a success payload or an error message, with its status code.
#[derive(Debug)]
pub enum ApiReply<T> {
    Ok(T),
    Err(StatusCode, ErrorBody),
}

impl<T> ApiReply<T> {
    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        ApiReply::Err(
            status,
            ErrorBody {
                error: message.into(),
            },
        )
    }
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        match self {
            ApiReply::Ok(body) => Json(body).into_response(),
            ApiReply::Err(status, body) => (status, Json(body)).into_response(),
        }
    }
}

pub fn single_reply(outcome: SingleOutcome) -> ApiReply<ArticleBody> {
    match outcome {
        SingleOutcome::Summarized { url, article } => ApiReply::Ok(ArticleBody {
            url,
            article: Some(article),
            error: None,
        }),
        SingleOutcome::Invalid => {
            ApiReply::error(StatusCode::UNPROCESSABLE_ENTITY, INVALID_URL_MESSAGE)
        }
        SingleOutcome::Failed => {
            ApiReply::error(StatusCode::BAD_GATEWAY, SUMMARIZE_FAILED_MESSAGE)
        }
    }
}

pub fn listing_reply(outcome: ListingOutcome) -> ApiReply<ListingBody> {
    match outcome {
        ListingOutcome::FetchFailed { source } => ApiReply::error(
            StatusCode::BAD_GATEWAY,
            ListingOutcome::fetch_failed_message(&source),
        ),
        ListingOutcome::Articles { source, items } => ApiReply::Ok(ListingBody {
            source: source.name().to_string(),
            articles: items.into_iter().map(ArticleBody::from).collect(),
        }),
    }
}

pub fn sources_body(registry: &SourceRegistry) -> Vec<SourceBody> {
    registry
        .entries()
        .into_iter()
        .map(|(source, homepage)| SourceBody {
            name: source.name().to_string(),
            homepage: homepage.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use crate::scrapers::sources::NewsSource;

    fn summary() -> ArticleSummary {
        ArticleSummary {
            title: "Title".to_string(),
            authors: "example.com".to_string(),
            publish_date: "N/A".to_string(),
            summary: "One.".to_string(),
            top_image: String::new(),
            sentiment: Sentiment::Neutral,
            polarity: 0.0,
        }
    }

    #[test]
    fn test_single_reply_statuses() {
        assert!(matches!(
            single_reply(SingleOutcome::Invalid),
            ApiReply::Err(status, _) if status == StatusCode::UNPROCESSABLE_ENTITY
        ));
        assert!(matches!(
            single_reply(SingleOutcome::Failed),
            ApiReply::Err(status, _) if status == StatusCode::BAD_GATEWAY
        ));

        let ApiReply::Ok(body) = single_reply(SingleOutcome::Summarized {
            url: "https://example.com/a".to_string(),
            article: summary(),
        }) else {
            panic!("expected success");
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["article"]["publishDate"], "N/A");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_listing_reply_marks_failed_items() {
        let outcome = ListingOutcome::Articles {
            source: NewsSource::RoundTableIndia,
            items: vec![
                ArticleOutcome {
                    url: "https://example.com/1".to_string(),
                    article: Some(summary()),
                },
                ArticleOutcome {
                    url: "https://example.com/2".to_string(),
                    article: None,
                },
            ],
        };
        let ApiReply::Ok(body) = listing_reply(outcome) else {
            panic!("expected success");
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["source"], "Round Table India");
        assert_eq!(json["articles"][0]["article"]["title"], "Title");
        assert!(json["articles"][0].get("error").is_none());
        assert!(json["articles"][1].get("article").is_none());
        assert_eq!(
            json["articles"][1]["error"],
            "Failed to summarize article: https://example.com/2"
        );
    }

    #[test]
    fn test_sources_body_lists_all_builtin_sources() {
        let body = sources_body(SourceRegistry::builtin());
        let names = body.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            ["Indian Express", "Round Table India", "Times of India", "India Today"]
        );
        assert_eq!(body[3].homepage, "https://www.indiatoday.in/");
    }
}
