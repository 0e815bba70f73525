use super::AppState;
use crate::dispatch::{summarize_single, summarize_top};
use crate::outputs::html::Page;
use crate::outputs::json::{self, ApiReply, ArticleBody, ListingBody, SourceBody};
use crate::scrapers::sources::NewsSource;
use axum::extract::{Form, Query, State};
use axum::response::Html;
use axum::Json;
use serde::Deserialize;

/// `url` field of the single-article form and `/api/summarize`.
#[derive(Debug, Deserialize)]
pub struct UrlParams {
    #[serde(default)]
    pub url: String,
}

/// `source` field of the listing form and `/api/top`.
#[derive(Debug, Deserialize)]
pub struct SourceParams {
    #[serde(default)]
    pub source: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(Page::blank(state.top_n()).to_string())
}

pub async fn summarize_form(
    State(state): State<AppState>,
    Form(params): Form<UrlParams>,
) -> Html<String> {
    let outcome = summarize_single(state.pipeline(), &params.url).await;
    let page = Page {
        url_input: &params.url,
        single: Some(&outcome),
        ..Page::blank(state.top_n())
    };
    Html(page.to_string())
}

pub async fn top_form(
    State(state): State<AppState>,
    Form(params): Form<SourceParams>,
) -> Html<String> {
    let outcome = summarize_top(state.pipeline(), state.registry(), &params.source).await;
    let page = Page {
        selected: params.source.parse::<NewsSource>().unwrap_or_default(),
        listing: Some(&outcome),
        ..Page::blank(state.top_n())
    };
    Html(page.to_string())
}

pub async fn api_summarize(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> ApiReply<ArticleBody> {
    json::single_reply(summarize_single(state.pipeline(), &params.url).await)
}

pub async fn api_top(
    State(state): State<AppState>,
    Query(params): Query<SourceParams>,
) -> ApiReply<ListingBody> {
    json::listing_reply(summarize_top(state.pipeline(), state.registry(), &params.source).await)
}

pub async fn api_sources(State(state): State<AppState>) -> Json<Vec<SourceBody>> {
    Json(json::sources_body(state.registry()))
}
