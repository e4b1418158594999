//! Stream id parsing.
//!
//! Addon clients address content with compound colon-delimited ids
//! (`tt1234567:2:5`, `tmdb:999:1:1`, `series:tmdb:999:1:1`, ...). This module
//! decodes them into a [`MediaIdentity`] or rejects them outright; there is
//! no partially-parsed state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of content being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Parse the path segment used by addon clients ("movie" / "series").
    pub fn from_path_segment(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }
}

/// Which catalog system an external id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSource {
    Imdb,
    Tmdb,
}

/// A fully parsed media identity. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaIdentity {
    /// Catalog system the id belongs to.
    pub source: IdSource,
    /// The raw external id ("tt1234567" for IMDb, "999" for TMDB).
    pub external_id: String,
    /// Requested season, when the id addresses an episode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    /// Requested episode, when the id addresses an episode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

/// Errors that can occur when parsing a stream id.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Unrecognized stream id: {0}")]
    Unrecognized(String),
}

/// Parse a compound stream id.
///
/// Recognized shapes, first match wins:
/// 1. `<imdbId>[:<season>:<episode>]`
/// 2. `tmdb:<id>[:<season>:<episode>]`
/// 3. `<movie|series>:tmdb:<id>[:<season>:<episode>]`
/// 4. `<movie|series>:<imdbId>[:<season>:<episode>]`
///
/// Season/episode must be positive integers; malformed numeric text is
/// treated as absent rather than failing the whole parse.
pub fn parse_stream_id(raw: &str) -> Result<MediaIdentity, IdentityError> {
    let parts: Vec<&str> = raw.split(':').collect();

    if is_imdb_id(parts[0]) {
        return Ok(MediaIdentity {
            source: IdSource::Imdb,
            external_id: parts[0].to_string(),
            season: parse_positive(parts.get(1)),
            episode: parse_positive(parts.get(2)),
        });
    }

    if parts[0] == "tmdb" {
        let id = parts.get(1).copied().unwrap_or_default();
        if !id.is_empty() {
            return Ok(MediaIdentity {
                source: IdSource::Tmdb,
                external_id: id.to_string(),
                season: parse_positive(parts.get(2)),
                episode: parse_positive(parts.get(3)),
            });
        }
        return Err(IdentityError::Unrecognized(raw.to_string()));
    }

    if parts[0] == "movie" || parts[0] == "series" {
        if parts.get(1).copied() == Some("tmdb") {
            let id = parts.get(2).copied().unwrap_or_default();
            if !id.is_empty() {
                return Ok(MediaIdentity {
                    source: IdSource::Tmdb,
                    external_id: id.to_string(),
                    season: parse_positive(parts.get(3)),
                    episode: parse_positive(parts.get(4)),
                });
            }
        } else if parts.get(1).copied().is_some_and(is_imdb_id) {
            return Ok(MediaIdentity {
                source: IdSource::Imdb,
                external_id: parts[1].to_string(),
                season: parse_positive(parts.get(2)),
                episode: parse_positive(parts.get(3)),
            });
        }
    }

    Err(IdentityError::Unrecognized(raw.to_string()))
}

/// "tt" followed by at least one digit.
fn is_imdb_id(s: &str) -> bool {
    s.len() > 2 && s.starts_with("tt") && s[2..].chars().all(|c| c.is_ascii_digit())
}

fn parse_positive(part: Option<&&str>) -> Option<u32> {
    part.and_then(|s| s.parse::<u32>().ok()).filter(|&n| n > 0)
}
