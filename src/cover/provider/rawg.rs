use super::{CoverCandidate, CoverProvider, HttpClient};
use crate::cover::Result;
use async_trait::async_trait;
use serde::Deserialize;

const RAWG_API_URL: &str = "https://api.rawg.io/api";

/// RAWG.io game search, the primary cover source. Works without an API key;
/// one can be supplied to lift the anonymous rate limits.
pub struct RawgProvider {
    client: HttpClient,
    api_key: Option<String>,
}

impl Default for RawgProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RawgProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: HttpClient::new(RAWG_API_URL),
            api_key,
        }
    }
}

#[async_trait]
impl CoverProvider for RawgProvider {
    fn id(&self) -> &'static str {
        "rawg"
    }

    async fn search(&self, title: &str) -> Result<Vec<CoverCandidate>> {
        let mut params = vec![("search", title), ("page_size", "5")];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.as_str()));
        }

        let response: SearchResponse = self.client.get_with_params("/games", &params).await?;

        Ok(response
            .results
            .into_iter()
            .map(|game| CoverCandidate {
                name: game.name,
                image_url: game.background_image,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawgGame>,
}

#[derive(Debug, Deserialize)]
struct RawgGame {
    name: String,
    background_image: Option<String>,
}
