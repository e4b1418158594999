//! Types for the torrent index search client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the index's search results listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Release name as listed (tooltip text).
    pub name: String,
    /// Numeric id of the torrent on the index.
    pub torrent_id: String,
    /// Human-readable size as listed ("1.4 GB"); "?" when missing.
    pub size: String,
    /// Seeder count; 0 when the listing omits it.
    pub seeders: u32,
    /// Category label as listed.
    pub category: String,
    /// URL of the raw .torrent payload.
    pub download_url: String,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search provider error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for torrent search backends.
///
/// One call maps to one provider request; the engine loops over generated
/// query variants and stops at the first non-empty result.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Execute a single search query.
    ///
    /// Malformed result rows are skipped, never fatal; transport failures
    /// surface as `SearchError` and the caller decides whether to continue.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_serialization() {
        let hit = SearchHit {
            name: "Dune 2021 1080p CZ".to_string(),
            torrent_id: "12345".to_string(),
            size: "8.2 GB".to_string(),
            seeders: 42,
            category: "Filmy CZ/SK".to_string(),
            download_url: "https://index.example/torrent/download.php?id=12345".to_string(),
        };

        let json = serde_json::to_string(&hit).unwrap();
        let parsed: SearchHit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.torrent_id, "12345");
        assert_eq!(parsed.seeders, 42);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SearchError::Timeout.to_string(), "Request timeout");
        assert!(SearchError::ConnectionFailed("refused".to_string())
            .to_string()
            .contains("refused"));
    }
}
