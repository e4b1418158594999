//! IMDb-style title provider.
//!
//! There is no public API for this source, so titles are scraped from the
//! HTML of the title page and the per-season episode listing. Markup varies
//! between page generations, hence the selector fallback chains.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::identity::MediaType;

use super::types::{TitleError, TitleInfo, TitleProvider};

const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
const USER_AGENT: &str = "Mozilla/5.0";

/// IMDb client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImdbConfig {
    /// Base URL (default: https://www.imdb.com).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Scraping client for the IMDb-style title source.
pub struct ImdbClient {
    client: Client,
    base_url: String,
}

impl ImdbClient {
    /// Create a new IMDb client.
    pub fn new(config: ImdbConfig) -> Result<Self, TitleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { client, base_url })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, TitleError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == 404 {
            return Err(TitleError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TitleError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TitleProvider for ImdbClient {
    fn name(&self) -> &str {
        "imdb"
    }

    async fn lookup_title(
        &self,
        external_id: &str,
        _media_type: MediaType,
    ) -> Result<TitleInfo, TitleError> {
        let url = format!("{}/title/{}/", self.base_url, external_id);
        debug!(id = external_id, "IMDb title lookup");

        let html = self.fetch_page(&url).await?;
        let info = parse_title_page(&html)?;

        debug!(
            title = %info.title,
            original = %info.original_title,
            "IMDb title resolved"
        );
        Ok(info)
    }

    async fn lookup_episode_title(
        &self,
        external_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, TitleError> {
        let url = format!(
            "{}/title/{}/episodes?season={}",
            self.base_url, external_id, season
        );
        debug!(id = external_id, season, episode, "IMDb episode lookup");

        let html = self.fetch_page(&url).await?;
        Ok(parse_episode_listing(&html, episode))
    }
}

/// Extract display and original titles from a title page.
///
/// The display title is the `<title>` text before the first " - "; the
/// original title comes from the ld+json metadata block's `name` or
/// `alternateName`, defaulting to the display title.
fn parse_title_page(html: &str) -> Result<TitleInfo, TitleError> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|t| t.split(" - ").next().map(|s| s.trim().to_string()))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TitleError::ParseError("no <title> element".to_string()))?;

    let ld_selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let original_title = document
        .select(&ld_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|json| serde_json::from_str::<serde_json::Value>(&json).ok())
        .and_then(|value| {
            value
                .get("name")
                .or_else(|| value.get("alternateName"))
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title.clone());

    Ok(TitleInfo::new(title, original_title))
}

/// Pull the requested episode's title out of the per-season listing.
fn parse_episode_listing(html: &str, episode: u32) -> Option<String> {
    let document = Html::parse_document(html);

    let item_selector = Selector::parse(".list_item, .ipc-episode").unwrap();
    let number_selector = Selector::parse("[data-episode-number]").unwrap();
    let title_selector =
        Selector::parse("strong a, .eplist-episode-title, .episode-title, .title a").unwrap();

    for item in document.select(&item_selector) {
        let number = item
            .select(&number_selector)
            .next()
            .and_then(|el| el.value().attr("data-episode-number"))
            .and_then(|n| n.parse::<u32>().ok());

        if number == Some(episode) {
            let title = item
                .select(&title_selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty());
            if title.is_some() {
                return title;
            }
        }
    }

    None
}
