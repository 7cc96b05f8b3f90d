use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use lede_client::{ArticleExtractor, ReqwestFetcher};
use lede_core::throttle::{ThrottleConfig, ThrottledFetcher};
use lede_server::routes;
use lede_server::state::AppState;

/// Router wired like production, except SSRF protection is disabled so
/// tests can scrape the local fixture site, and throttling is off.
pub fn test_router() -> Router {
    let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(5))
        .expect("fetcher")
        .allow_private_urls();
    let fetcher = ThrottledFetcher::new(fetcher, ThrottleConfig::new(Duration::ZERO));

    routes::router(Arc::new(AppState {
        fetcher,
        extractor: ArticleExtractor::new(),
    }))
}

/// Serve fixture HTML from an OS-assigned port on 127.0.0.1, standing in
/// for the remote news site. Returns the article URL.
pub async fn serve_fixture(html: &'static str) -> String {
    let app = Router::new().route("/story", get(move || async move { Html(html) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });
    format!("http://{addr}/story")
}

pub const ARTICLE_FIXTURE: &str = r#"<html><head>
    <meta property="og:title" content="Senate Passes Budget">
    <meta property="og:image" content="https://cdn.example.com/hero.jpg">
    <meta name="author" content="Jane Doe">
    <meta name="keywords" content="senate, budget">
    <meta property="article:published_time" content="2024-03-01T10:00:00Z">
</head><body>
    <article>
        <p>The Senate passed the annual budget on Friday after a marathon
        overnight session that stretched well past midnight.</p>
        <p>Lawmakers from both parties praised the compromise measure,
        which funds the government through the end of the fiscal year.</p>
    </article>
</body></html>"#;

/// A page with nothing extractable in it.
pub const EMPTY_FIXTURE: &str = "<html><body></body></html>";
