use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::info;

use scout::server::{self, AppState};
use scout::{Config, HttpFetcher, Scraper, export_csv, rank};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let _log_guard = scout::logging::init(&config.log_file, &config.log_level)?;

    let fetcher = HttpFetcher::new(&config.fetch_settings()).context("failed to build http client")?;
    let scraper = Scraper::new(Arc::new(fetcher), config.scrape_settings());

    // `scout <listing-url>` runs once and writes the export file.
    if let Some(listing_url) = std::env::args().nth(1) {
        let candidates = scraper
            .scrape_all(&listing_url)
            .await
            .context("scraping failed")?;
        let ranked = rank(candidates);
        export_csv(&config.export_path, &ranked)
            .with_context(|| format!("failed to write {}", config.export_path.display()))?;
        return Ok(());
    }

    info!(bind = %config.bind, "starting scout");
    let state = web::Data::new(AppState { scraper });
    HttpServer::new(move || App::new().app_data(state.clone()).configure(server::configure))
        .bind(&config.bind)
        .with_context(|| format!("failed to bind {}", config.bind))?
        .run()
        .await?;
    Ok(())
}
