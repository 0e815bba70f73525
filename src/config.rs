//! Runtime configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file (`--config`)
//! 3. Command-line flags / environment variables (see [`crate::cli::Cli`])
//!
//! # Example file
//!
//! ```yaml
//! listen: 0.0.0.0:8501
//! assets_dir: ./images
//! http:
//!   timeout_secs: 15
//! summary:
//!   sentences: 4
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the web server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Directory with `logo_news.png` and `banner.jpg`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            assets_dir: default_assets_dir(),
            http: HttpConfig::default(),
            summary: SummaryConfig::default(),
            listing: ListingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for article and homepage downloads
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    /// Maximum number of sentences in a summary
    #[serde(default = "default_summary_sentences")]
    pub sentences: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentences: default_summary_sentences(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// How many homepage articles the "top articles" action summarizes;
    /// values above 5 are capped at 5
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_articles: default_max_articles(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (compatible; {}/{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn default_summary_sentences() -> usize {
    5
}

fn default_max_articles() -> usize {
    5
}

impl AppConfig {
    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the effective configuration from the CLI and, if given, the
    /// config file it points at.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => {
                let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                info!(%path, "Loaded config file");
                Self::from_yaml(&yaml)?
            }
            None => Self::default(),
        };

        config.apply_overrides(cli);
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }
        if let Some(dir) = &cli.assets_dir {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(secs) = cli.timeout_secs {
            self.http.timeout_secs = secs;
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|_| ConfigError::Listen(self.listen.clone()))
    }
}
