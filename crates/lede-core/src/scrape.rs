use std::time::Instant;

use chrono::Utc;
use url::Url;

use crate::error::AppError;
use crate::models::ScrapeResult;
use crate::traits::{Extractor, Fetcher};

/// Orchestrates the scrape pipeline: validate → fetch → extract → stamp.
///
/// Generic over the fetcher and extractor via traits, enabling dependency
/// injection and testability without real HTTP calls.
pub struct ScrapeService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    fetcher: F,
    extractor: E,
}

impl<F, E> ScrapeService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Run the full pipeline for one article URL.
    ///
    /// 1. Validate the URL (absolute, http/https, has a host)
    /// 2. Fetch the raw HTML
    /// 3. Extract article fields
    /// 4. Stamp extraction time and elapsed seconds
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, AppError> {
        validate_url(url)?;
        let started = Instant::now();

        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let extracted = self.extractor.extract(&html, url)?;
        let scrape_time = started.elapsed().as_secs_f64();
        tracing::info!(
            method = extracted.method,
            text_len = extracted.article.text.len(),
            elapsed_s = format!("{scrape_time:.2}"),
            "Extraction complete"
        );

        Ok(ScrapeResult {
            article: extracted.article,
            source: url.to_string(),
            method: extracted.method.to_string(),
            timestamp: Utc::now(),
            scrape_time,
        })
    }
}

/// Reject anything that is not an absolute http(s) URL with a host.
fn validate_url(url: &str) -> Result<(), AppError> {
    let parsed =
        Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{url:?} does not parse: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::InvalidUrl(format!(
                "scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::InvalidUrl(format!("{url:?} has no host")));
    }

    Ok(())
}
