//! HTML search client for the torrent index.
//!
//! The index has no API; results come from the public search page. Each
//! result row is an anchor to the detail page wrapping a thumbnail, with
//! size and seeder counts embedded as labeled text in the surrounding cell.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::{header, Client};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::titles::normalize::strip_diacritics;

use super::{SearchError, SearchHit, Searcher};

/// Category stems accepted after diacritic stripping and lowercasing.
/// Everything else (music, games, software...) is not playable media.
const ACCEPTED_CATEGORY_STEMS: [&str; 5] = ["film", "seri", "tv porad", "dokument", "sport"];

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Velkost\s([^|]+)").unwrap());
static SEEDERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Odosielaju\s*:\s*(\d+)").unwrap());

/// Search client for the torrent index.
pub struct IndexSearcher {
    client: Client,
    config: IndexConfig,
}

impl IndexSearcher {
    /// Create a new index searcher with the given configuration.
    pub fn new(config: IndexConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the search URL for a query.
    ///
    /// Dots are replaced by spaces before sending: dotted variants exist for
    /// release-name matching, but the provider indexes on spaced text.
    fn build_search_url(&self, query: &str) -> String {
        let spaced = query.replace('.', " ");
        format!(
            "{}{}?search={}&category=0",
            self.config.base_url.trim_end_matches('/'),
            self.config.search_path,
            urlencoding::encode(&spaced)
        )
    }

    fn cookie_header(&self) -> String {
        format!("uid={}; pass={}", self.config.uid, self.config.pass)
    }
}

#[async_trait]
impl Searcher for IndexSearcher {
    fn name(&self) -> &str {
        "index"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let url = self.build_search_url(query);
        debug!(query, "Searching torrent index");

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, self.cookie_header())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else if e.is_connect() {
                    SearchError::ConnectionFailed(e.to_string())
                } else {
                    SearchError::ApiError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::ApiError(e.to_string()))?;

        let hits = parse_results(
            &html,
            &self.config.base_url,
            &self.config.download_path,
        );

        debug!(query, results = hits.len(), "Index search complete");
        Ok(hits)
    }
}

/// Parse the results listing into hits, dropping rows that are malformed or
/// outside the accepted categories.
fn parse_results(html: &str, base_url: &str, download_path: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    let anchor_selector = Selector::parse(r#"a[href^="details.php"]"#).unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let bold_selector = Selector::parse("b").unwrap();

    let mut hits = Vec::new();

    for anchor in document.select(&anchor_selector) {
        // Only the thumbnail anchor carries the tooltip with the full name;
        // plain text links to the same detail page are skipped.
        if anchor.select(&img_selector).next().is_none() {
            continue;
        }

        let name = match anchor.value().attr("title") {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => continue,
        };

        let torrent_id = match anchor
            .value()
            .attr("href")
            .and_then(|href| href.rsplit("id=").next())
        {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => continue,
        };

        let Some(cell) = anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td")
        else {
            warn!(name = %name, "Result row without enclosing cell");
            continue;
        };

        let category = cell
            .select(&bold_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !category_accepted(&category) {
            continue;
        }

        let block = cell
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let size = SIZE_RE
            .captures(&block)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "?".to_string());

        let seeders = SEEDERS_RE
            .captures(&block)
            .and_then(|c| c[1].parse::<u32>().ok())
            .unwrap_or(0);

        let download_url = format!(
            "{}{}?id={}",
            base_url.trim_end_matches('/'),
            download_path,
            torrent_id
        );

        hits.push(SearchHit {
            name,
            torrent_id,
            size,
            seeders,
            category,
            download_url,
        });
    }

    hits
}

/// Case/diacritic-insensitive substring match against the accepted stems.
fn category_accepted(category: &str) -> bool {
    let normalized = strip_diacritics(category).to_lowercase();
    ACCEPTED_CATEGORY_STEMS
        .iter()
        .any(|stem| normalized.contains(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> IndexConfig {
        IndexConfig {
            base_url: "https://index.example".to_string(),
            search_path: "/torrent/torrents_v2.php".to_string(),
            download_path: "/torrent/download.php".to_string(),
            uid: "u1".to_string(),
            pass: "p1".to_string(),
            timeout_secs: 30,
        }
    }

    const LISTING: &str = r#"<html><body><table>
        <tr><td>
            <a href="details.php?id=111" title="Stiahni si Filmy CZ/SK Dune 2021 1080p CZ EN">
                <img src="thumb1.jpg">
            </a>
            <b>Filmy CZ/SK</b> | Velkost 8.2 GB | Odosielaju : 42 | Stahuju : 3
        </td></tr>
        <tr><td>
            <a href="details.php?id=222" title="Stiahni si Serialy Dark S01E02 CZ">
                <img src="thumb2.jpg">
            </a>
            <b>Seriály</b> | Velkost 700 MB | Odosielaju : 7
        </td></tr>
        <tr><td>
            <a href="details.php?id=333" title="Stiahni si Hudba Some Album FLAC">
                <img src="thumb3.jpg">
            </a>
            <b>Hudba</b> | Velkost 400 MB | Odosielaju : 99
        </td></tr>
        <tr><td>
            <a href="details.php?id=444" title="Stiahni si Dokumenty Planet Earth">
                <img src="thumb4.jpg">
            </a>
            <b>Dokumenty</b> | Velkost 2 GB
        </td></tr>
        <tr><td>
            <a href="details.php?id=555">text-only link, no thumbnail</a>
            <b>Filmy CZ/SK</b> | Velkost 1 GB | Odosielaju : 5
        </td></tr>
    </table></body></html>"#;

    #[test]
    fn test_parse_results_extracts_rows() {
        let hits = parse_results(LISTING, "https://index.example", "/torrent/download.php");

        assert_eq!(hits.len(), 3);

        assert_eq!(hits[0].torrent_id, "111");
        assert_eq!(hits[0].name, "Stiahni si Filmy CZ/SK Dune 2021 1080p CZ EN");
        assert_eq!(hits[0].size, "8.2 GB");
        assert_eq!(hits[0].seeders, 42);
        assert_eq!(hits[0].category, "Filmy CZ/SK");
        assert_eq!(
            hits[0].download_url,
            "https://index.example/torrent/download.php?id=111"
        );

        assert_eq!(hits[1].torrent_id, "222");
        assert_eq!(hits[1].seeders, 7);
    }

    #[test]
    fn test_parse_results_drops_unaccepted_category() {
        let hits = parse_results(LISTING, "https://index.example", "/torrent/download.php");
        assert!(!hits.iter().any(|h| h.category == "Hudba"));
    }

    #[test]
    fn test_parse_results_missing_seeders_defaults_zero() {
        let hits = parse_results(LISTING, "https://index.example", "/torrent/download.php");
        let docs = hits.iter().find(|h| h.torrent_id == "444").unwrap();
        assert_eq!(docs.seeders, 0);
        assert_eq!(docs.size, "2 GB");
    }

    #[test]
    fn test_parse_results_skips_text_only_anchor() {
        let hits = parse_results(LISTING, "https://index.example", "/torrent/download.php");
        assert!(!hits.iter().any(|h| h.torrent_id == "555"));
    }

    #[test]
    fn test_parse_results_empty_page() {
        assert!(parse_results("<html></html>", "https://x", "/d.php").is_empty());
    }

    #[test]
    fn test_category_accepted() {
        assert!(category_accepted("Filmy CZ/SK"));
        assert!(category_accepted("Seriály"));
        assert!(category_accepted("TV Pořady"));
        assert!(category_accepted("Dokumenty"));
        assert!(category_accepted("Šport"));
        assert!(!category_accepted("Hudba"));
        assert!(!category_accepted("Hry"));
        assert!(!category_accepted(""));
    }

    #[test]
    fn test_build_search_url_replaces_dots() {
        let searcher = IndexSearcher::new(test_config());
        let url = searcher.build_search_url("Dark.S01E02");
        assert!(url.starts_with(
            "https://index.example/torrent/torrents_v2.php?search="
        ));
        assert!(url.contains("Dark%20S01E02"));
        assert!(url.ends_with("&category=0"));
    }

    #[test]
    fn test_cookie_header() {
        let searcher = IndexSearcher::new(test_config());
        assert_eq!(searcher.cookie_header(), "uid=u1; pass=p1");
    }
}
