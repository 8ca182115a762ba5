mod http;
mod igdb;
mod rawg;

pub use http::HttpClient;
pub use igdb::IgdbProvider;
pub use rawg::RawgProvider;

use crate::cover::Result;
use async_trait::async_trait;

/// One search result from a cover source
#[derive(Debug, Clone)]
pub struct CoverCandidate {
    /// Candidate title as reported by the source
    pub name: String,
    /// Cover image URL, when the source exposes one
    pub image_url: Option<String>,
}

/// Narrow interface over an external game-search endpoint: title in,
/// candidate list out. Concrete providers are swappable and mockable.
#[async_trait]
pub trait CoverProvider: Send + Sync {
    /// Provider identifier (e.g., "rawg", "igdb")
    fn id(&self) -> &'static str;

    /// Search for cover candidates matching a normalized title
    async fn search(&self, title: &str) -> Result<Vec<CoverCandidate>>;
}
