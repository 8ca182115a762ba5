mod cache;
mod parser;
mod scraper;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use cache::TtlCache;
pub use parser::{NameParser, ParsedName, ParserRules, UNKNOWN};
pub use scraper::{DirectoryScraper, FetchError, HttpFetcher, PageFetcher};
pub use service::{CatalogConfig, CatalogService};
pub use types::{CatalogEntry, Platform, entry_id, slug_id, strip_manufacturer_prefix};
