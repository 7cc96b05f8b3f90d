use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lede_core::models::ScrapeResult;

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

/// Query parameters for `GET /scrape`.
///
/// `url` is optional here so a missing parameter produces our JSON 400
/// instead of axum's plain-text rejection.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ScrapeQuery {
    /// Article URL to scrape (percent-encoded).
    pub url: Option<String>,
}

/// JSON body for `POST /scrape`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScrapeBody {
    /// Article URL to scrape.
    pub url: String,
}

/// The extraction result. The seven contract keys (`title`, `authors`,
/// `text`, `images`, `top_image`, `keywords`, `timestamp`) are always
/// present; unavailable values are empty, never omitted.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    pub title: String,
    pub authors: Vec<String>,
    pub text: String,
    pub images: Vec<String>,
    pub top_image: String,
    pub keywords: Vec<String>,
    /// When extraction occurred (ISO-8601), not the article publish time.
    pub timestamp: DateTime<Utc>,
    /// Publish date as found in the page, verbatim.
    pub publish_date: Option<String>,
    /// Leading ~500 characters of the body text.
    pub summary: String,
    /// Extraction strategy that produced the body text.
    pub method: String,
    /// The URL that was scraped.
    pub source: String,
    /// Seconds spent fetching and extracting.
    pub scrape_time: f64,
}

impl From<ScrapeResult> for ArticleResponse {
    fn from(result: ScrapeResult) -> Self {
        let article = result.article;
        Self {
            title: article.title,
            authors: article.authors,
            text: article.text,
            images: article.images,
            top_image: article.top_image,
            keywords: article.keywords,
            timestamp: result.timestamp,
            publish_date: article.publish_date,
            summary: article.summary,
            method: result.method,
            source: result.source,
            scrape_time: result.scrape_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Health & service info
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    /// Extraction strategies, in the order they are attempted.
    pub strategies: Vec<&'static str>,
    #[schema(value_type = Object)]
    pub endpoints: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
