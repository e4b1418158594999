use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::resolver::ResolverConfig;
use crate::titles::{ImdbConfig, TmdbConfig};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub index: IndexConfig,
    #[serde(default)]
    pub titles: TitlesConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    7000
}

/// Torrent index configuration.
///
/// `uid`/`pass` form the opaque session credential attached as a cookie to
/// search and download requests; the engine never interprets them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Index base URL (e.g. "https://index.example").
    pub base_url: String,
    /// Path of the search page.
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Path of the .torrent download endpoint.
    #[serde(default = "default_download_path")]
    pub download_path: String,
    /// Session credential: user id.
    pub uid: String,
    /// Session credential: password hash.
    pub pass: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_search_path() -> String {
    "/torrent/torrents_v2.php".to_string()
}

fn default_download_path() -> String {
    "/torrent/download.php".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Title provider configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TitlesConfig {
    /// IMDb-style provider (always available, scraping only).
    #[serde(default)]
    pub imdb: ImdbConfig,
    /// TMDB-style provider (enabled when configured with an API key).
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub index: SanitizedIndexConfig,
    pub titles: SanitizedTitlesConfig,
    pub resolver: ResolverConfig,
}

/// Sanitized index config (session credential hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedIndexConfig {
    pub base_url: String,
    pub credentials_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized titles config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTitlesConfig {
    pub tmdb_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            index: SanitizedIndexConfig {
                base_url: config.index.base_url.clone(),
                credentials_configured: !config.index.uid.is_empty()
                    && !config.index.pass.is_empty(),
                timeout_secs: config.index.timeout_secs,
            },
            titles: SanitizedTitlesConfig {
                tmdb_configured: config
                    .titles
                    .tmdb
                    .as_ref()
                    .is_some_and(|t| !t.api_key.is_empty()),
            },
            resolver: config.resolver.clone(),
        }
    }
}
