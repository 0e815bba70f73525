//! Error types for URL handling, the article pipeline and configuration.
//!
//! Pipeline failures are collapsed into a single generic message before they
//! reach the browser; the typed variants here exist so the cause can still be
//! logged.

use thiserror::Error;

/// A URL that could not be turned into a site name.
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("error parsing URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Why a single article could not be summarized.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Transport failure, timeout or a non-success status code.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] UrlError),

    /// The page downloaded but did not look like an article.
    #[error("extraction failed: {0}")]
    Extraction(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid listen address {0:?}")]
    Listen(String),
}

/// Returned when a name does not match any known news source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown news source: {0:?}")]
pub struct UnknownSource(pub String);
