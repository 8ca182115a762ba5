use super::parser::NameParser;
use super::types::{CatalogEntry, Platform, entry_id};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

static FILE_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href$='.zip']").expect("Invalid selector"));
static DIR_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href$='/']").expect("Invalid selector"));

/// Transport failure while fetching a listing page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),
}

/// Fetches one page of the remote archive. Swappable so tests can inject
/// failing or recording transports.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a bounded request timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("romdex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Scrapes archive directory listings into catalog records. Any transport
/// failure yields an empty result set, never an error; callers treat empty
/// as a legitimate outcome and do not retry.
pub struct DirectoryScraper {
    fetcher: Arc<dyn PageFetcher>,
    parser: NameParser,
    base_url: String,
}

impl DirectoryScraper {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: NameParser,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            fetcher,
            parser,
            base_url,
        }
    }

    /// Listing URL for one platform directory, percent-encoded
    pub fn platform_url(&self, platform: &str) -> String {
        format!("{}/{}/", self.base_url, urlencoding::encode(platform))
    }

    /// Fetch and parse one platform's listing into catalog entries
    pub async fn platform_listing(&self, platform: &str) -> Vec<CatalogEntry> {
        let url = self.platform_url(platform);

        match self.fetcher.fetch(&url).await {
            Ok(html) => {
                let entries = self.parse_platform_listing(platform, &url, &html);
                debug!("Scraped {} entries for {platform}", entries.len());
                entries
            }
            Err(e) => {
                warn!("Failed to fetch listing for {platform}: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch and parse the archive root into discoverable platforms
    pub async fn root_listing(&self) -> Vec<Platform> {
        let url = format!("{}/", self.base_url);

        match self.fetcher.fetch(&url).await {
            Ok(html) => {
                let platforms = parse_root_listing(&html);
                debug!("Scraped {} platforms from archive root", platforms.len());
                platforms
            }
            Err(e) => {
                warn!("Failed to fetch archive root: {e}");
                Vec::new()
            }
        }
    }

    fn parse_platform_listing(
        &self,
        platform: &str,
        listing_url: &str,
        html: &str,
    ) -> Vec<CatalogEntry> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for element in document.select(&FILE_LINKS) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let filename = decode_or_raw(href);

            // First occurrence wins
            if !seen.insert(filename.clone()) {
                continue;
            }

            let parsed = self.parser.parse(&filename);
            let title = if parsed.title.is_empty() {
                filename.clone()
            } else {
                parsed.title
            };

            entries.push(CatalogEntry {
                id: entry_id(platform, &filename),
                title,
                region: parsed.region,
                languages: parsed.languages,
                platform: platform.to_string(),
                download_url: format!("{listing_url}{}", urlencoding::encode(&filename)),
                filename,
            });
        }

        entries
    }
}

fn parse_root_listing(html: &str) -> Vec<Platform> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut platforms = Vec::new();

    for element in document.select(&DIR_LINKS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let label = element.text().collect::<String>();

        // Skip the parent-directory link in either of its spellings
        if href == "../" || label.trim() == "Parent Directory" {
            continue;
        }

        let name = decode_or_raw(href.trim_end_matches('/'));
        if !seen.insert(name.clone()) {
            continue;
        }

        platforms.push(Platform::from_directory_name(&name));
    }

    platforms
}

/// Decode percent-encoding, falling back to the raw value on failure
fn decode_or_raw(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingFetcher(u16);

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status(self.0))
        }
    }

    fn make_scraper(fetcher: Arc<dyn PageFetcher>) -> DirectoryScraper {
        DirectoryScraper::new(
            fetcher,
            NameParser::new(),
            "https://archive.example/files/No-Intro",
        )
    }

    const PLATFORM_LISTING: &str = r#"
        <html><body><table>
        <tr><td><a href="../">Parent Directory</a></td></tr>
        <tr><td><a href="Sonic%20the%20Hedgehog%20%28USA%29.zip">Sonic the Hedgehog (USA).zip</a></td></tr>
        <tr><td><a href="Sonic%20the%20Hedgehog%20%28USA%29.zip">Sonic the Hedgehog (USA).zip</a></td></tr>
        <tr><td><a href="Tetris%20%28World%29.zip">Tetris (World).zip</a></td></tr>
        <tr><td><a href="readme.txt">readme.txt</a></td></tr>
        </table></body></html>
    "#;

    const ROOT_LISTING: &str = r#"
        <html><body>
        <a href="../">Parent Directory</a>
        <a href="Nintendo%20-%20Game%20Boy/">Nintendo - Game Boy/</a>
        <a href="Nintendo%20-%20Game%20Boy/">Nintendo - Game Boy/</a>
        <a href="Sega%20-%20Saturn/">Sega - Saturn/</a>
        <a href="notes.html">notes</a>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_platform_listing_parses_and_dedupes() {
        let scraper = make_scraper(Arc::new(StaticFetcher(PLATFORM_LISTING)));
        let entries = scraper.platform_listing("Sega - Mega Drive / Genesis").await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Sonic the Hedgehog");
        assert_eq!(entries[0].region, "USA");
        assert_eq!(entries[0].languages, vec!["English".to_string()]);
        assert_eq!(entries[0].filename, "Sonic the Hedgehog (USA).zip");
        assert_eq!(entries[1].title, "Tetris");
    }

    #[tokio::test]
    async fn test_platform_listing_builds_download_url() {
        let scraper = make_scraper(Arc::new(StaticFetcher(PLATFORM_LISTING)));
        let entries = scraper.platform_listing("Nintendo - Game Boy").await;

        assert_eq!(
            entries[0].download_url,
            "https://archive.example/files/No-Intro/Nintendo%20-%20Game%20Boy/Sonic%20the%20Hedgehog%20%28USA%29.zip"
        );
    }

    #[tokio::test]
    async fn test_platform_listing_empty_on_http_error() {
        let scraper = make_scraper(Arc::new(FailingFetcher(503)));
        let entries = scraper.platform_listing("Nintendo - Game Boy").await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_platform_listing_empty_on_garbage_html() {
        let scraper = make_scraper(Arc::new(StaticFetcher("<<<not html at all")));
        let entries = scraper.platform_listing("Nintendo - Game Boy").await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_root_listing_skips_parent_and_dedupes() {
        let scraper = make_scraper(Arc::new(StaticFetcher(ROOT_LISTING)));
        let platforms = scraper.root_listing().await;

        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[0].name, "Nintendo - Game Boy");
        assert_eq!(platforms[0].display_name, "Game Boy");
        assert_eq!(platforms[0].id, "nintendo___game_boy");
        assert_eq!(platforms[1].display_name, "Saturn");
    }

    #[tokio::test]
    async fn test_root_listing_empty_on_network_failure() {
        let scraper = make_scraper(Arc::new(FailingFetcher(500)));
        assert!(scraper.root_listing().await.is_empty());
    }
}
