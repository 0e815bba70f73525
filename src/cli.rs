//! Command-line interface definitions for SnapNews.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be supplied through an environment variable, and
//! every option overrides the matching value from the YAML config file.

use clap::Parser;

/// Command-line arguments for the SnapNews server.
///
/// # Examples
///
/// ```sh
/// # Serve on the default address with built-in settings
/// snap_news
///
/// # Use a config file and override the listen address
/// snap_news -c ./snap_news.yaml -l 0.0.0.0:8080
///
/// # Give slow news sites more time
/// SNAP_NEWS_TIMEOUT=30 snap_news
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "SNAP_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:8501
    #[arg(short, long, env = "SNAP_NEWS_LISTEN")]
    pub listen: Option<String>,

    /// Directory holding the page icon and banner images
    #[arg(short, long, env = "SNAP_NEWS_ASSETS")]
    pub assets_dir: Option<String>,

    /// Timeout in seconds for each outbound HTTP request
    #[arg(long, env = "SNAP_NEWS_TIMEOUT")]
    pub timeout_secs: Option<u64>,
}
