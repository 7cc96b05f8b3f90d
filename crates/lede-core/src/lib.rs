pub mod error;
pub mod models;
pub mod scrape;
pub mod testutil;
pub mod throttle;
pub mod traits;

pub use error::AppError;
pub use models::{Article, Extracted, ScrapeResult};
pub use scrape::ScrapeService;
pub use traits::{Extractor, Fetcher};
