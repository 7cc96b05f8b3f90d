use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::Utc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use lede_core::error::AppError;
use lede_core::scrape::ScrapeService;

use crate::dto::{
    ArticleResponse, HealthResponse, ScrapeBody, ScrapeQuery, ServiceInfoResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrape", get(scrape).post(scrape_post))
        .route("/health", get(health))
        .route("/", get(index))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/scrape",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Extracted article", body = ArticleResponse),
        (status = 400, description = "Missing or invalid url parameter", body = crate::dto::ErrorResponse),
        (status = 422, description = "Page fetched but no article text found", body = crate::dto::ErrorResponse),
        (status = 502, description = "Target site unreachable or errored", body = crate::dto::ErrorResponse),
        (status = 504, description = "Target site timed out", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScrapeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::InvalidUrl("missing required 'url' parameter".to_string()))?;

    run_scrape(&state, &url).await
}

#[utoipa::path(
    post,
    path = "/scrape",
    request_body = ScrapeBody,
    responses(
        (status = 200, description = "Extracted article", body = ArticleResponse),
        (status = 400, description = "Invalid url", body = crate::dto::ErrorResponse),
        (status = 422, description = "Page fetched but no article text found", body = crate::dto::ErrorResponse),
        (status = 502, description = "Target site unreachable or errored", body = crate::dto::ErrorResponse),
        (status = 504, description = "Target site timed out", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape_post(
    State(state): State<Arc<AppState>>,
    body: Result<axum::Json<ScrapeBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Malformed bodies get our JSON error shape, not axum's plain-text reply.
    let axum::Json(body) =
        body.map_err(|e| AppError::InvalidUrl(format!("invalid request body: {e}")))?;
    run_scrape(&state, &body.url).await
}

async fn run_scrape(
    state: &AppState,
    url: &str,
) -> Result<axum::Json<ArticleResponse>, ApiError> {
    tracing::info!(url = %url, "Scrape request");
    let service = ScrapeService::new(state.fetcher.clone(), state.extractor);
    let result = service.scrape(url).await?;
    Ok(axum::Json(ArticleResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Health & service info
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        service: "lede",
        timestamp: Utc::now(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service self-description", body = ServiceInfoResponse),
    ),
    tag = "system"
)]
pub async fn index() -> impl IntoResponse {
    axum::Json(ServiceInfoResponse {
        service: "lede",
        version: env!("CARGO_PKG_VERSION"),
        strategies: vec!["json-ld", "selectors", "full-text"],
        endpoints: serde_json::json!({
            "/scrape": {
                "methods": ["GET", "POST"],
                "description": "Extract article content from a URL",
                "parameters": { "url": "The article URL to scrape (required)" },
                "example": "/scrape?url=https://example.com/article"
            },
            "/health": {
                "methods": ["GET"],
                "description": "Health check"
            },
            "/swagger-ui": {
                "methods": ["GET"],
                "description": "Interactive API documentation"
            }
        }),
    })
}
