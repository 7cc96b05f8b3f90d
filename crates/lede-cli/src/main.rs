use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lede_client::{ArticleExtractor, ReqwestFetcher};
use lede_core::ScrapeService;

#[derive(Parser)]
#[command(name = "lede", version, about = "Extract structured article data from news pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an article URL and print the extracted JSON to stdout
    Scrape {
        /// Article URL to scrape
        #[arg(short, long)]
        url: String,

        /// Fetch timeout in seconds
        #[arg(long, env = "LEDE_FETCH_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,

        /// Allow private/reserved target IPs (you control this machine)
        #[arg(long, default_value_t = false)]
        allow_private: bool,

        /// Print compact JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays parseable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lede=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            timeout_secs,
            allow_private,
            compact,
        } => {
            let mut fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(timeout_secs))
                .context("Failed to build HTTP client")?;
            if allow_private {
                fetcher = fetcher.allow_private_urls();
            }

            let service = ScrapeService::new(fetcher, ArticleExtractor::new());
            let result = service
                .scrape(&url)
                .await
                .with_context(|| format!("Failed to scrape {url}"))?;

            let rendered = if compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}
