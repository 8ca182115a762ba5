use super::{CoverCandidate, CoverProvider, HttpClient};
use crate::cover::Result;
use async_trait::async_trait;
use serde::Deserialize;

const IGDB_API_URL: &str = "https://api.igdb.com/v4";

/// IGDB game search via the Twitch API, the secondary cover source.
/// Requires a client id and an OAuth access token, so it is only added to
/// the provider chain when both are configured.
pub struct IgdbProvider {
    client: HttpClient,
    client_id: String,
    access_token: String,
}

impl IgdbProvider {
    pub fn new(client_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(IGDB_API_URL),
            client_id: client_id.into(),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl CoverProvider for IgdbProvider {
    fn id(&self) -> &'static str {
        "igdb"
    }

    async fn search(&self, title: &str) -> Result<Vec<CoverCandidate>> {
        let escaped = title.replace('"', "\\\"");
        let body = format!("search \"{escaped}\"; fields name,cover.url; limit 5;");
        let authorization = format!("Bearer {}", self.access_token);
        let headers = [
            ("Client-ID", self.client_id.as_str()),
            ("Authorization", authorization.as_str()),
        ];

        let games: Vec<IgdbGame> = self.client.post_text("/games", body, &headers).await?;

        Ok(games
            .into_iter()
            .map(|game| CoverCandidate {
                name: game.name,
                image_url: game.cover.map(|c| cover_image_url(&c.url)),
            })
            .collect())
    }
}

/// IGDB returns protocol-relative thumbnail URLs; upgrade them to the
/// full-size cover rendition
fn cover_image_url(raw: &str) -> String {
    let sized = raw.replace("t_thumb", "t_cover_big");
    if sized.starts_with("//") {
        format!("https:{sized}")
    } else {
        sized
    }
}

#[derive(Debug, Deserialize)]
struct IgdbGame {
    name: String,
    cover: Option<IgdbCover>,
}

#[derive(Debug, Deserialize)]
struct IgdbCover {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_image_url_upgrades_thumb() {
        assert_eq!(
            cover_image_url("//images.igdb.com/igdb/image/upload/t_thumb/co1r7h.jpg"),
            "https://images.igdb.com/igdb/image/upload/t_cover_big/co1r7h.jpg"
        );
    }

    #[test]
    fn test_cover_image_url_keeps_absolute() {
        assert_eq!(
            cover_image_url("https://example.com/t_thumb/x.jpg"),
            "https://example.com/t_cover_big/x.jpg"
        );
    }
}
