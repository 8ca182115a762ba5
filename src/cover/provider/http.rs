use crate::cover::{CoverError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for cover providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("romdex/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Execute GET request with query parameters and parse JSON response
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(CoverError::Network)?;

        Self::handle_response(response).await
    }

    /// Execute POST request with a plain-text body and extra headers
    pub async fn post_text<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .header("Accept", "application/json");

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.body(body).send().await.map_err(CoverError::Network)?;

        Self::handle_response(response).await
    }

    /// Handle response and parse JSON
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(CoverError::Api {
                status: status_code,
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CoverError::Parse(format!("JSON parse error: {e}")))
    }
}
