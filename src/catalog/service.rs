use super::cache::TtlCache;
use super::scraper::DirectoryScraper;
use super::types::{CatalogEntry, Platform};
use std::time::Duration;
use tracing::debug;

const PLATFORMS_KEY: &str = "consoles";

/// Catalog service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// TTL for the platform list
    pub platforms_ttl: Duration,
    /// TTL for per-platform title lists
    pub titles_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            platforms_ttl: Duration::from_secs(3600),
            titles_ttl: Duration::from_secs(1800),
        }
    }
}

/// Orchestrates the directory scraper and the catalog cache. Queries return
/// cached values while fresh and refetch on miss or expiry; an empty listing
/// is a legitimate result and is cached like any other.
pub struct CatalogService {
    scraper: DirectoryScraper,
    platforms: TtlCache<Vec<Platform>>,
    titles: TtlCache<Vec<CatalogEntry>>,
}

impl CatalogService {
    pub fn new(scraper: DirectoryScraper, config: CatalogConfig) -> Self {
        Self {
            scraper,
            platforms: TtlCache::new(config.platforms_ttl),
            titles: TtlCache::new(config.titles_ttl),
        }
    }

    /// List platforms discovered from the archive root
    pub async fn list_platforms(&self) -> Vec<Platform> {
        if let Some((cached, true)) = self.platforms.get(PLATFORMS_KEY) {
            debug!("Cache hit for platform list");
            return (*cached).clone();
        }

        let fetched = self.scraper.root_listing().await;
        self.platforms.insert(PLATFORMS_KEY, fetched.clone());
        fetched
    }

    /// List catalog entries for one platform directory
    pub async fn list_titles(&self, platform: &str) -> Vec<CatalogEntry> {
        if let Some((cached, true)) = self.titles.get(platform) {
            debug!("Cache hit for titles of {platform}");
            return (*cached).clone();
        }

        let fetched = self.scraper.platform_listing(platform).await;
        self.titles.insert(platform, fetched.clone());
        fetched
    }

    /// Unconditionally drop every cached platform and title list
    pub fn clear_cache(&self) {
        self.platforms.clear();
        self.titles.clear();
    }
}
