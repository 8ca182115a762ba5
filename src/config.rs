use crate::catalog::CatalogConfig;
use crate::cover::ResolverConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration, layered from built-in defaults, an optional
/// `romdex.toml`, and `ROMDEX_`-prefixed environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub archive: ArchiveConfig,
    pub covers: CoversConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Base URL of the archive directory tree
    pub base_url: String,
    /// Per-request fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// TTL for the cached platform list, in seconds
    pub platforms_ttl_secs: u64,
    /// TTL for cached per-platform title lists, in seconds
    pub titles_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoversConfig {
    /// TTL for resolved cover URLs, in seconds
    pub cache_ttl_secs: u64,
    /// Similarity threshold below which candidates are rejected
    pub min_similarity: f64,
    /// In-flight request cap during batch prefetch
    pub prefetch_concurrency: usize,
    /// Optional RAWG API key
    pub rawg_api_key: Option<String>,
    /// IGDB credentials; the provider is disabled unless both are set
    pub igdb_client_id: Option<String>,
    pub igdb_access_token: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default(
                "archive.base_url",
                "https://myrient.erista.me/files/No-Intro",
            )?
            .set_default("archive.fetch_timeout_secs", 30_i64)?
            .set_default("archive.platforms_ttl_secs", 3600_i64)?
            .set_default("archive.titles_ttl_secs", 1800_i64)?
            .set_default("covers.cache_ttl_secs", 86_400_i64)?
            .set_default("covers.min_similarity", 0.6_f64)?
            .set_default("covers.prefetch_concurrency", 3_i64)?
            .add_source(File::with_name("romdex").required(false))
            .add_source(Environment::with_prefix("ROMDEX").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.archive.fetch_timeout_secs)
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            platforms_ttl: Duration::from_secs(self.archive.platforms_ttl_secs),
            titles_ttl: Duration::from_secs(self.archive.titles_ttl_secs),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            cache_ttl: Duration::from_secs(self.covers.cache_ttl_secs),
            min_similarity: self.covers.min_similarity,
            prefetch_concurrency: self.covers.prefetch_concurrency,
            ..ResolverConfig::default()
        }
    }

    pub fn igdb_credentials(&self) -> Option<(String, String)> {
        match (&self.covers.igdb_client_id, &self.covers.igdb_access_token) {
            (Some(id), Some(token)) => Some((id.clone(), token.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_file() {
        let config = AppConfig::load().expect("defaults should deserialize");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.archive.fetch_timeout_secs, 30);
        assert_eq!(config.archive.platforms_ttl_secs, 3600);
        assert_eq!(config.archive.titles_ttl_secs, 1800);
        assert_eq!(config.covers.cache_ttl_secs, 86_400);
        assert!((config.covers.min_similarity - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.covers.prefetch_concurrency, 3);
        assert!(config.igdb_credentials().is_none());
    }
}
