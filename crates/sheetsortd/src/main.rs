//! Sheetsort daemon - LLM-assisted post triage into a shared spreadsheet.
//!
//! Accepts scraped posts over HTTP, classifies them, and appends one row
//! per post to a category tab of the configured Google Sheet.

use anyhow::{Context, Result};
use sheetsortd::classifier::Classifier;
use sheetsortd::config::{Config, Secrets};
use sheetsortd::gemini::GeminiClient;
use sheetsortd::server::{self, AppState};
use sheetsortd::sheets::GoogleSheetsClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("sheetsortd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let secrets = Secrets::from_env()?;

    // Store connection is verified once, up front. No lazy reconnect.
    let sheets = GoogleSheetsClient::new(
        &config.sheets.spreadsheet_id,
        &secrets.sheets_token,
        config.sheets.timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build sheets client: {}", e))?;
    sheets
        .connect()
        .await
        .map_err(|e| anyhow::anyhow!("spreadsheet unreachable at startup: {}", e))?;

    let backend = GeminiClient::new(secrets.gemini_api_key, config.llm.timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build LLM client: {}", e))?;
    let classifier = Classifier::new(Arc::new(backend), &config.llm);

    let state = AppState::new(Some(Arc::new(sheets)), classifier);

    server::run(state, &config.bind_addr)
        .await
        .context("HTTP server failed")
}
