use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lede_client::{ArticleExtractor, ReqwestFetcher};
use lede_core::throttle::{ThrottleConfig, ThrottledFetcher};
use lede_server::routes;
use lede_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lede=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("LEDE_SERVER_PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let timeout_secs = env_u64("LEDE_FETCH_TIMEOUT_SECS", 30);
    let throttle_ms = env_u64("LEDE_THROTTLE_DELAY_MS", 1000);
    let allow_private = std::env::var("LEDE_ALLOW_PRIVATE_URLS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let mut fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(timeout_secs))?;
    if allow_private {
        tracing::warn!("SSRF protection disabled (LEDE_ALLOW_PRIVATE_URLS)");
        fetcher = fetcher.allow_private_urls();
    }
    let fetcher = ThrottledFetcher::new(
        fetcher,
        ThrottleConfig::new(Duration::from_millis(throttle_ms))
            .with_jitter(Duration::from_millis(500)),
    );

    let state = Arc::new(AppState {
        fetcher,
        extractor: ArticleExtractor::new(),
    });

    // Browser clients call this API directly, so CORS is open.
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
