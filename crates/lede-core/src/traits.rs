use std::future::Future;

use crate::error::AppError;
use crate::models::Extracted;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Extracts article fields from raw HTML.
///
/// Extraction is pure parsing — no I/O — so this is a synchronous seam.
/// The page URL is passed alongside the HTML so relative image links
/// can be resolved.
pub trait Extractor: Send + Sync + Clone {
    fn extract(&self, html: &str, url: &str) -> Result<Extracted, AppError>;
}
