//! HTTP song list client.

use crate::error::{CatalogError, Result};
use crate::types::{parse_records, SongRecord};
use reqwest::Client;
use tracing::debug;

/// Client for the `GET /api/songs` endpoint of a Lyra server.
pub struct HttpCatalog {
    http: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the server at `base_url`.
    ///
    /// The URL must be absolute (`http://` or `https://`); trailing slashes
    /// are removed.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self {
            http: build_client()?,
            base_url,
        })
    }

    /// The normalized server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the song list.
    pub async fn fetch_songs(&self) -> Result<Vec<SongRecord>> {
        let url = format!("{}/api/songs", self.base_url);
        debug!(url = %url, "Fetching song list");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if is_unreachable(&e) {
                CatalogError::Unreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let records = parse_records(&body)?;
            debug!(songs = records.len(), "Fetched song list");
            Ok(records)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<Client> {
    use std::time::Duration;

    Ok(Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("Lyra/{}", env!("CARGO_PKG_VERSION")))
        .build()?)
}

// The browser owns timeouts and the user agent
#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<Client> {
    Ok(Client::new())
}

#[cfg(not(target_arch = "wasm32"))]
fn is_unreachable(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

#[cfg(target_arch = "wasm32")]
fn is_unreachable(_error: &reqwest::Error) -> bool {
    false
}
