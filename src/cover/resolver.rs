use super::provider::{CoverCandidate, CoverProvider};
use super::similarity::similarity;
use crate::catalog::TtlCache;
use futures::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("Invalid regex"));
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("Invalid regex"));
static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:\-_]").expect("Invalid regex"));

/// Cover resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// TTL for resolved cover URLs
    pub cache_ttl: Duration,
    /// Minimum similarity for a candidate to be accepted
    pub min_similarity: f64,
    /// Maximum candidates considered per provider response
    pub max_candidates: usize,
    /// Concurrent in-flight requests during batch prefetch
    pub prefetch_concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(86_400),
            min_similarity: 0.6,
            max_candidates: 5,
            prefetch_concurrency: 3,
        }
    }
}

/// Resolves a display title to a cover image URL. Providers are consulted in
/// order; candidates are ranked by name similarity, and everything below the
/// threshold is rejected so a wrong cover is treated as worse than none.
/// Failures and no-matches degrade to a deterministic placeholder.
pub struct CoverResolver {
    providers: Vec<Arc<dyn CoverProvider>>,
    cache: TtlCache<String>,
    config: ResolverConfig,
}

impl CoverResolver {
    pub fn new(providers: Vec<Arc<dyn CoverProvider>>, config: ResolverConfig) -> Self {
        Self {
            providers,
            cache: TtlCache::new(config.cache_ttl),
            config,
        }
    }

    /// Resolve one title to an image URL. The cache is keyed by the
    /// original, unnormalized title.
    pub async fn resolve(&self, title: &str) -> String {
        if let Some((cached, true)) = self.cache.get(title) {
            debug!("Cover cache hit for {title}");
            return (*cached).clone();
        }

        let normalized = normalize_title(title);

        for provider in &self.providers {
            match provider.search(&normalized).await {
                Ok(candidates) => {
                    if let Some(url) = self.best_image(&normalized, candidates) {
                        self.cache.insert(title, url.clone());
                        return url;
                    }
                    debug!("Provider {} had no acceptable match for {title}", provider.id());
                }
                Err(e) => {
                    warn!("Cover provider {} failed for {title}: {e}", provider.id());
                }
            }
        }

        placeholder_url(title)
    }

    /// Resolve a batch of titles with a bounded number of in-flight
    /// requests, draining the list as each one settles
    pub async fn prefetch(&self, titles: Vec<String>) {
        let limit = self.config.prefetch_concurrency.max(1);

        futures::stream::iter(titles)
            .for_each_concurrent(Some(limit), |title| async move {
                let _ = self.resolve(&title).await;
            })
            .await;
    }

    /// Unconditionally drop every cached cover URL
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Pick the highest-similarity candidate at or above the threshold, then
    /// require it to expose an image
    fn best_image(&self, normalized: &str, candidates: Vec<CoverCandidate>) -> Option<String> {
        let mut best: Option<(f64, Option<String>)> = None;

        for candidate in candidates.into_iter().take(self.config.max_candidates) {
            let score = similarity(normalized, &normalize_title(&candidate.name));
            if score < self.config.min_similarity {
                continue;
            }
            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((score, candidate.image_url));
            }
        }

        best.and_then(|(_, image)| image)
    }
}

/// Normalize a title for searching and comparison: strip bracketed
/// segments, turn punctuation into spaces, collapse whitespace, lower-case
pub fn normalize_title(title: &str) -> String {
    let stripped = PARENS.replace_all(title, "");
    let stripped = BRACKETS.replace_all(&stripped, "");
    let spaced = PUNCT.replace_all(&stripped, " ");

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Deterministic placeholder image reference embedding the truncated title
pub fn placeholder_url(title: &str) -> String {
    let short = if title.chars().count() > 20 {
        let head: String = title.chars().take(20).collect();
        format!("{head}...")
    } else {
        title.to_string()
    };

    format!(
        "https://via.placeholder.com/300x400/1a1a1a/3b82f6?text={}",
        urlencoding::encode(&short)
    )
}
