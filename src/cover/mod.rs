mod provider;
mod resolver;
mod similarity;

pub use provider::{CoverCandidate, CoverProvider, HttpClient, IgdbProvider, RawgProvider};
pub use resolver::{CoverResolver, ResolverConfig, normalize_title, placeholder_url};
pub use similarity::similarity;

use std::sync::Arc;

/// Cover result type
pub type Result<T> = std::result::Result<T, CoverError>;

/// Cover provider error types
#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Create a resolver with the default provider chain: RAWG first, IGDB as
/// the secondary source when credentials are configured
pub fn create_default_resolver(
    config: ResolverConfig,
    rawg_api_key: Option<String>,
    igdb_credentials: Option<(String, String)>,
) -> CoverResolver {
    let mut providers: Vec<Arc<dyn CoverProvider>> = vec![Arc::new(RawgProvider::new(rawg_api_key))];

    if let Some((client_id, access_token)) = igdb_credentials {
        providers.push(Arc::new(IgdbProvider::new(client_id, access_token)));
    }

    CoverResolver::new(providers, config)
}
