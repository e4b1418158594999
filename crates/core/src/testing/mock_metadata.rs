//! Mock torrent metadata resolver for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::torrent::{MetadataError, MetadataResolver, TorrentMetadata};

/// Mock implementation of the MetadataResolver trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable metadata per download URL
/// - Simulate fetch failures for specific URLs
/// - Track resolved URLs for assertions
#[derive(Default)]
pub struct MockMetadataResolver {
    metadata: Arc<RwLock<HashMap<String, TorrentMetadata>>>,
    failing_urls: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the metadata returned for a download URL.
    pub async fn set_metadata(&self, download_url: &str, metadata: TorrentMetadata) {
        self.metadata
            .write()
            .await
            .insert(download_url.to_string(), metadata);
    }

    /// Make a specific URL fail with a fetch error.
    pub async fn set_failing_url(&self, download_url: &str) {
        self.failing_urls
            .write()
            .await
            .insert(download_url.to_string());
    }

    /// URLs resolved so far, in order of completion.
    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl MetadataResolver for MockMetadataResolver {
    async fn resolve(&self, download_url: &str) -> Result<TorrentMetadata, MetadataError> {
        self.calls.write().await.push(download_url.to_string());

        if self.failing_urls.read().await.contains(download_url) {
            return Err(MetadataError::Fetch("mock failure".to_string()));
        }

        self.metadata
            .read()
            .await
            .get(download_url)
            .cloned()
            .ok_or_else(|| MetadataError::Fetch(format!("no metadata for {}", download_url)))
    }
}
