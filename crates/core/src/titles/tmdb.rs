//! TMDB-style title provider.
//!
//! Requires an API key. Lookups are plain JSON endpoints keyed by the
//! numeric id; series episodes have their own endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::identity::MediaType;

use super::types::{TitleError, TitleInfo, TitleProvider};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// API client for the TMDB-style title source.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, TitleError> {
        if config.api_key.is_empty() {
            return Err(TitleError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, TitleError> {
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(TitleError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(TitleError::NotFound(url.to_string()));
        }
        if status == 429 {
            return Err(TitleError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TitleError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TitleError::ParseError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl TitleProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn lookup_title(
        &self,
        external_id: &str,
        media_type: MediaType,
    ) -> Result<TitleInfo, TitleError> {
        let endpoint = match media_type {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        };
        let url = format!("{}/{}/{}", self.base_url, endpoint, external_id);

        debug!(id = external_id, endpoint, "TMDB title lookup");

        let details: TmdbTitleResponse = self.get_json(&url).await?;

        let title = details
            .title
            .or(details.name)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TitleError::ParseError("response has no title field".to_string()))?;
        let original_title = details
            .original_title
            .or(details.original_name)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| title.clone());

        debug!(title = %title, original = %original_title, "TMDB title resolved");
        Ok(TitleInfo::new(title, original_title))
    }

    async fn lookup_episode_title(
        &self,
        external_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, TitleError> {
        let url = format!(
            "{}/tv/{}/season/{}/episode/{}",
            self.base_url, external_id, season, episode
        );

        debug!(id = external_id, season, episode, "TMDB episode lookup");

        match self.get_json::<TmdbEpisodeResponse>(&url).await {
            Ok(details) => Ok(details.name.or(details.title).filter(|t| !t.is_empty())),
            Err(TitleError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// TMDB API response types. Movie and TV payloads use different field names
// for the same concepts, so both sets are optional and merged afterwards.
#[derive(Debug, Deserialize)]
struct TmdbTitleResponse {
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbEpisodeResponse {
    name: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = TmdbClient::new(TmdbConfig {
            api_key: String::new(),
            base_url: None,
        });
        assert!(matches!(result, Err(TitleError::NotConfigured(_))));
    }

    #[test]
    fn test_client_name() {
        let client = TmdbClient::new(TmdbConfig {
            api_key: "key".to_string(),
            base_url: None,
        })
        .unwrap();
        assert_eq!(client.name(), "tmdb");
    }

    #[test]
    fn test_movie_response_fields() {
        let json = r#"{"title": "Dune", "original_title": "Dune: Part One"}"#;
        let parsed: TmdbTitleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Dune"));
        assert_eq!(parsed.original_title.as_deref(), Some("Dune: Part One"));
        assert!(parsed.name.is_none());
    }

    #[test]
    fn test_tv_response_fields() {
        let json = r#"{"name": "Dark", "original_name": "Dark"}"#;
        let parsed: TmdbTitleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Dark"));
        assert!(parsed.title.is_none());
    }
}
