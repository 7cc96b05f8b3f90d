use lede_core::error::AppError;
use lede_core::models::{Article, Extracted};
use lede_core::traits::Extractor;
use scraper::Html;
use url::Url;

use crate::{content, jsonld, metadata};

/// HTML article extractor built on the `scraper` crate.
///
/// Parses the document once, pulls page metadata, then runs the
/// body-text strategy cascade (see [`content`]). Metadata fields degrade
/// to empty values; only a missing body fails the extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleExtractor;

impl ArticleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ArticleExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<Extracted, AppError> {
        let base = Url::parse(url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;
        let doc = Html::parse_document(html);
        let ld = jsonld::blocks(&doc);

        let meta = metadata::extract(&doc, &base, &ld);
        let (text, method) = content::body_text(&doc, &ld).ok_or_else(|| {
            AppError::ExtractionFailed {
                url: url.to_string(),
            }
        })?;
        let summary = content::summarize(&text);

        tracing::debug!(
            method,
            title = %meta.title,
            authors = meta.authors.len(),
            images = meta.images.len(),
            "Extracted article"
        );

        Ok(Extracted {
            article: Article {
                title: meta.title,
                authors: meta.authors,
                text,
                top_image: meta.images.first().cloned().unwrap_or_default(),
                images: meta.images,
                keywords: meta.keywords,
                publish_date: meta.publish_date,
                summary,
            },
            method,
        })
    }
}
