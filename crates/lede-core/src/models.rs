use chrono::{DateTime, Utc};

/// Structured fields extracted from a single article page.
///
/// Every field is always present; extraction substitutes empty values
/// for anything the page does not expose rather than omitting fields.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Article {
    /// Article headline. Empty if no candidate was found.
    pub title: String,
    /// Author names in document order, deduplicated.
    pub authors: Vec<String>,
    /// Full extracted body text.
    pub text: String,
    /// Image URLs in document order, resolved against the page URL.
    pub images: Vec<String>,
    /// The article's primary/featured image (first of `images`).
    pub top_image: String,
    /// Keywords/tags in source order.
    pub keywords: Vec<String>,
    /// Publish date as found in the page, verbatim. Not the scrape time.
    pub publish_date: Option<String>,
    /// Leading ~500 characters of the body text.
    pub summary: String,
}

/// An article together with the name of the strategy that produced its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub article: Article,
    /// Strategy name, e.g. "json-ld", "selectors", "full-text".
    pub method: &'static str,
}

/// A completed scrape: the extracted article plus request-time metadata.
///
/// Serializes flat — the article fields sit at the top level next to the
/// request metadata, which is the documented response shape.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScrapeResult {
    #[serde(flatten)]
    pub article: Article,
    /// The URL that was scraped.
    pub source: String,
    /// Extraction strategy that produced the body text.
    pub method: String,
    /// When extraction occurred (response time, not article publish time).
    pub timestamp: DateTime<Utc>,
    /// Wall-clock seconds spent fetching and extracting.
    pub scrape_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_article_has_all_fields_empty() {
        let article = Article::default();
        assert!(article.title.is_empty());
        assert!(article.authors.is_empty());
        assert!(article.text.is_empty());
        assert!(article.images.is_empty());
        assert!(article.top_image.is_empty());
        assert!(article.keywords.is_empty());
        assert!(article.publish_date.is_none());
        assert!(article.summary.is_empty());
    }

    #[test]
    fn scrape_result_serializes_flat() {
        let result = ScrapeResult {
            article: Article::default(),
            source: "https://example.com".into(),
            method: "selectors".into(),
            timestamp: Utc::now(),
            scrape_time: 0.2,
        };
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["title", "text", "timestamp", "method", "source", "scrape_time"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(!obj.contains_key("article"));
    }

    #[test]
    fn article_serializes_every_key() {
        let json = serde_json::to_value(Article::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "title",
            "authors",
            "text",
            "images",
            "top_image",
            "keywords",
            "publish_date",
            "summary",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }
}
