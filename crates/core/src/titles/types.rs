//! Types for title lookup providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::MediaType;

/// Title data for one piece of content, sourced from exactly one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleInfo {
    /// Display title in the lookup locale.
    pub title: String,
    /// Original-language title; defaults to `title` when the provider has
    /// no alternate name.
    pub original_title: String,
    /// Title of the requested episode, when one was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,
}

impl TitleInfo {
    pub fn new(title: impl Into<String>, original_title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            original_title: original_title.into(),
            episode_title: None,
        }
    }
}

/// Errors that can occur when talking to a title provider.
#[derive(Debug, Error)]
pub enum TitleError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Title not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimited,

    /// Provider returned an error status.
    #[error("Provider error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to extract titles from the response.
    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// A lookup service that maps an external id to title data.
///
/// Implemented by the IMDb-style scraping client and the TMDB-style API
/// client; the engine picks one per request based on the id's source system.
#[async_trait]
pub trait TitleProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Resolve display and original titles for an external id.
    async fn lookup_title(
        &self,
        external_id: &str,
        media_type: MediaType,
    ) -> Result<TitleInfo, TitleError>;

    /// Resolve the title of a single episode, if the provider knows it.
    ///
    /// `Ok(None)` means the provider answered but has no title; callers fall
    /// back to numeric episode tags.
    async fn lookup_episode_title(
        &self,
        external_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, TitleError>;
}
