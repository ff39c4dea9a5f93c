//! CLI client for sheetsortd.
//!
//! Submits a post to a running daemon or checks its health. This is the
//! command-line stand-in for the browser extension that normally feeds the
//! daemon.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sheetsort_common::{ErrorBody, HealthResponse, ProcessRequest, ProcessResponse};

#[derive(Parser)]
#[command(name = "sheetsortctl", version, about = "Submit posts to sheetsortd")]
struct Cli {
    /// Daemon base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    daemon: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a post for classification and filing
    Submit {
        /// Post text
        #[arg(long)]
        text: String,
        /// Post author as scraped
        #[arg(long, default_value = "")]
        author: String,
        /// Post URL
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Show daemon health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Command::Submit { text, author, url } => {
            let request = ProcessRequest { text, author, url };
            let response = client
                .post(format!("{}/process", cli.daemon))
                .json(&request)
                .send()
                .await
                .context("daemon unreachable")?;

            if response.status().is_success() {
                let body: ProcessResponse = response
                    .json()
                    .await
                    .context("malformed daemon response")?;
                println!(
                    "{} filed under {} (tab {})",
                    "ok:".green().bold(),
                    body.category.bold(),
                    body.tab
                );
                if !body.summary.is_empty() {
                    println!("  {}", body.summary);
                }
            } else {
                let status = response.status();
                let body: ErrorBody = response
                    .json()
                    .await
                    .unwrap_or(ErrorBody { detail: "unknown error".to_string() });
                bail!("{} {}: {}", "error".red(), status, body.detail);
            }
        }
        Command::Health => {
            let body: HealthResponse = client
                .get(format!("{}/v1/health", cli.daemon))
                .send()
                .await
                .context("daemon unreachable")?
                .json()
                .await
                .context("malformed health response")?;

            println!("{} v{}", body.status.green(), body.version);
            println!("  uptime: {}s", body.uptime_seconds);
            println!(
                "  sheets: {}",
                if body.sheets_connected {
                    "connected".green().to_string()
                } else {
                    "disconnected".red().to_string()
                }
            );
        }
    }

    Ok(())
}
