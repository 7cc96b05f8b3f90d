pub mod content;
pub mod extractor;
pub mod fetcher;
pub mod jsonld;
pub mod metadata;

pub use extractor::ArticleExtractor;
pub use fetcher::ReqwestFetcher;
