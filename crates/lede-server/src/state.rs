use lede_client::{ArticleExtractor, ReqwestFetcher};
use lede_core::throttle::ThrottledFetcher;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// The fetcher is built once and shared so its connection pool and
/// per-domain throttle state outlive individual requests.
pub struct AppState {
    pub fetcher: ThrottledFetcher<ReqwestFetcher>,
    pub extractor: ArticleExtractor,
}
