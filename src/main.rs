//! # SnapNews
//!
//! A small web service that summarizes news articles. Paste an article URL
//! to get its title, byline, publish date, lead image, an extractive summary
//! and a sentiment label; or pick one of four Indian news outlets to have
//! the first five stories on its homepage summarized in one go.
//!
//! ## Usage
//!
//! ```sh
//! snap_news -l 127.0.0.1:8501 -a ./images
//! ```
//!
//! ## Architecture
//!
//! 1. **Dispatch**: validate the input or look up the chosen source
//! 2. **Listing**: for a source, collect up to five story URLs from its homepage
//! 3. **Pipeline**: download, extract, summarize and score each article
//! 4. **Output**: render the results as the HTML page or as JSON
//!
//! Nothing is stored between requests.

use clap::Parser;
use std::error::Error;
use tracing::{info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod dispatch;
mod error;
mod models;
mod nlp;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;
mod web;

use cli::Cli;
use config::AppConfig;
use pipeline::Pipeline;
use scrapers::sources::SourceRegistry;
use utils::missing_assets;

const ASSETS: &[&str] = &["logo_news.png", "banner.jpg"];

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("snap_news starting up");

    let args = Cli::parse();
    let config = AppConfig::load(&args)?;
    let addr = config.listen_addr()?;
    info!(
        listen = %addr,
        assets_dir = %config.assets_dir.display(),
        timeout_secs = config.http.timeout_secs,
        summary_sentences = config.summary.sentences,
        max_articles = config.listing.max_articles,
        "Loaded configuration"
    );

    let missing = missing_assets(&config.assets_dir, ASSETS);
    if !missing.is_empty() {
        warn!(
            assets_dir = %config.assets_dir.display(),
            missing = ?missing,
            "Static assets not found; page will render without them"
        );
    }

    let registry = SourceRegistry::builtin();
    for (source, homepage) in registry.entries() {
        info!(%source, %homepage, "Registered news source");
    }

    let pipeline = Pipeline::new(&config)?;
    let app = web::router(web::AppState::new(pipeline, registry), &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("snap_news stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
