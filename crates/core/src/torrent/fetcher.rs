//! Authenticated `.torrent` payload fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::debug;

use crate::config::IndexConfig;

use super::parser::parse_metadata;
use super::TorrentMetadata;

/// Errors that can occur while resolving torrent metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to fetch torrent: {0}")]
    Fetch(String),

    #[error("Timeout fetching torrent")]
    Timeout,

    #[error("Failed to decode torrent: {0}")]
    Decode(String),
}

/// Resolves a hit's download URL into parsed torrent metadata.
///
/// Callers treat any failure as "skip this candidate" - one bad torrent
/// never fails the whole request.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, download_url: &str) -> Result<TorrentMetadata, MetadataError>;
}

/// HTTP implementation: fetches the payload with the index session
/// credential and a Referer header (the index rejects bare requests).
pub struct HttpMetadataResolver {
    client: Client,
    cookie: String,
    referer: String,
}

impl HttpMetadataResolver {
    /// Create a new resolver bound to the index credentials.
    pub fn new(config: &IndexConfig, fetch_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(fetch_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            cookie: format!("uid={}; pass={}", config.uid, config.pass),
            referer: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl MetadataResolver for HttpMetadataResolver {
    async fn resolve(&self, download_url: &str) -> Result<TorrentMetadata, MetadataError> {
        debug!(url = %download_url, "Fetching torrent payload");

        let response = self
            .client
            .get(download_url)
            .header(header::COOKIE, &self.cookie)
            .header(header::REFERER, &self.referer)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MetadataError::Timeout
                } else {
                    MetadataError::Fetch(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(MetadataError::Fetch(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MetadataError::Fetch(e.to_string()))?;

        let metadata = parse_metadata(&bytes).map_err(|e| MetadataError::Decode(e.to_string()))?;

        debug!(
            info_hash = %metadata.info_hash,
            files = metadata.files.len(),
            "Torrent metadata resolved"
        );
        Ok(metadata)
    }
}
