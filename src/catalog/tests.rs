//! Catalog service integration tests

use crate::catalog::{
    CatalogConfig, CatalogService, DirectoryScraper, FetchError, NameParser, PageFetcher,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const LISTING: &str = r#"
    <html><body>
    <a href="../">Parent Directory</a>
    <a href="Nintendo%20-%20Game%20Boy/">Nintendo - Game Boy/</a>
    <a href="007%20-%20Nothing%20%28USA%2C%20Europe%29%20%28En%2CFr%2CDe%29.zip">007</a>
    <a href="Game%20%28Japan%29.zip">Game (Japan).zip</a>
    </body></html>
"#;

struct CountingFetcher {
    body: Option<&'static str>,
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new(body: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            body,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.body {
            Some(body) => Ok(body.to_string()),
            None => Err(FetchError::Status(502)),
        }
    }
}

fn make_service(fetcher: Arc<CountingFetcher>) -> CatalogService {
    let scraper = DirectoryScraper::new(fetcher, NameParser::new(), "https://archive.example/files");
    CatalogService::new(scraper, CatalogConfig::default())
}

#[tokio::test]
async fn test_list_titles_parses_entries() {
    let service = make_service(CountingFetcher::new(Some(LISTING)));
    let titles = service.list_titles("Nintendo - Game Boy").await;

    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].title, "007 - Nothing");
    assert_eq!(titles[0].region, "USA, Europe");
    assert_eq!(
        titles[0].languages,
        vec!["English".to_string(), "French".to_string(), "German".to_string()]
    );
    assert_eq!(titles[1].languages, vec!["Japanese".to_string()]);
}

#[tokio::test]
async fn test_list_titles_served_from_cache_while_fresh() {
    let fetcher = CountingFetcher::new(Some(LISTING));
    let service = make_service(Arc::clone(&fetcher));

    let first = service.list_titles("Nintendo - Game Boy").await;
    let second = service.list_titles("Nintendo - Game Boy").await;

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_distinct_platforms_cached_independently() {
    let fetcher = CountingFetcher::new(Some(LISTING));
    let service = make_service(Arc::clone(&fetcher));

    service.list_titles("Nintendo - Game Boy").await;
    service.list_titles("Sega - Saturn").await;
    service.list_titles("Nintendo - Game Boy").await;

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let fetcher = CountingFetcher::new(Some(LISTING));
    let service = make_service(Arc::clone(&fetcher));

    service.list_titles("Nintendo - Game Boy").await;
    service.clear_cache();
    service.list_titles("Nintendo - Game Boy").await;

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_list_platforms_cached() {
    let fetcher = CountingFetcher::new(Some(LISTING));
    let service = make_service(Arc::clone(&fetcher));

    let platforms = service.list_platforms().await;
    service.list_platforms().await;

    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0].display_name, "Game Boy");
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_yields_empty_and_is_cached() {
    let fetcher = CountingFetcher::new(None);
    let service = make_service(Arc::clone(&fetcher));

    let titles = service.list_titles("Nintendo - Game Boy").await;
    assert!(titles.is_empty());

    // The empty result is a legitimate value; no automatic retry
    let again = service.list_titles("Nintendo - Game Boy").await;
    assert!(again.is_empty());
    assert_eq!(fetcher.calls(), 1);
}
