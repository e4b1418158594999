//! The stream resolution engine.
//!
//! Wires the pipeline together: identity parsing, title lookup, query
//! generation, index search with short-circuit fallback, per-hit torrent
//! metadata resolution, episode matching and final ranking.
//!
//! The engine never errors to the caller; every failure degrades to fewer
//! (possibly zero) results. Error detail lives in logs and metrics.

pub mod episode;
pub mod rank;
pub mod streams;
mod types;

pub use types::StreamCandidate;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::identity::{parse_stream_id, IdSource, MediaType};
use crate::metrics;
use crate::query::QueryGenerator;
use crate::searcher::{SearchHit, Searcher};
use crate::titles::normalize::is_multi_season_pack;
use crate::titles::TitleProvider;
use crate::torrent::MetadataResolver;

/// Configuration for the resolution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum concurrent torrent metadata fetches per request.
    #[serde(default = "default_max_parallel_fetches")]
    pub max_parallel_fetches: usize,

    /// Timeout for fetching each .torrent payload (seconds).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_max_parallel_fetches() -> usize {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_parallel_fetches: default_max_parallel_fetches(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// The resolution engine. Stateless per request; collaborators are injected
/// at construction.
pub struct StreamResolver {
    imdb: Arc<dyn TitleProvider>,
    tmdb: Option<Arc<dyn TitleProvider>>,
    searcher: Arc<dyn Searcher>,
    metadata: Arc<dyn MetadataResolver>,
    queries: QueryGenerator,
    config: ResolverConfig,
}

impl StreamResolver {
    /// Create a new resolver.
    ///
    /// `tmdb` is optional: without it, ids from that system resolve to an
    /// empty candidate list.
    pub fn new(
        imdb: Arc<dyn TitleProvider>,
        tmdb: Option<Arc<dyn TitleProvider>>,
        searcher: Arc<dyn Searcher>,
        metadata: Arc<dyn MetadataResolver>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            imdb,
            tmdb,
            searcher,
            metadata,
            queries: QueryGenerator::new(),
            config,
        }
    }

    /// Resolve a raw stream id into a ranked candidate list.
    ///
    /// The only caller-visible failure mode is an empty list; "nothing
    /// found" and "lookup failed" are indistinguishable by design.
    pub async fn resolve(&self, media_type: MediaType, raw_id: &str) -> Vec<StreamCandidate> {
        metrics::RESOLVE_REQUESTS
            .with_label_values(&[media_type.as_str()])
            .inc();
        info!(media_type = media_type.as_str(), id = raw_id, "Resolving streams");

        let identity = match parse_stream_id(raw_id) {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Rejecting request");
                return Vec::new();
            }
        };

        let provider: &Arc<dyn TitleProvider> = match identity.source {
            IdSource::Imdb => &self.imdb,
            IdSource::Tmdb => match &self.tmdb {
                Some(provider) => provider,
                None => {
                    warn!(id = %identity.external_id, "TMDB id but no TMDB provider configured");
                    return Vec::new();
                }
            },
        };

        let mut titles = match provider
            .lookup_title(&identity.external_id, media_type)
            .await
        {
            Ok(titles) => titles,
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Title lookup failed");
                metrics::LOOKUP_FAILURES.inc();
                return Vec::new();
            }
        };

        if media_type == MediaType::Series {
            if let (Some(season), Some(episode)) = (identity.season, identity.episode) {
                titles.episode_title = match provider
                    .lookup_episode_title(&identity.external_id, season, episode)
                    .await
                {
                    Ok(title) => title,
                    Err(e) => {
                        // Episode titles only widen the query set; a failed
                        // lookup is not terminal.
                        debug!(provider = provider.name(), error = %e, "Episode title lookup failed");
                        None
                    }
                };
            }
        }

        let queries = self
            .queries
            .build(&titles, media_type, identity.season, identity.episode);
        metrics::QUERIES_GENERATED.observe(queries.len() as f64);

        let hits = self.first_productive_query(&queries).await;
        if hits.is_empty() {
            info!("No torrents found");
            metrics::STREAMS_RETURNED.observe(0.0);
            return Vec::new();
        }

        let candidates = match media_type {
            MediaType::Movie => {
                stream::iter(hits.into_iter().map(|hit| self.movie_candidate(hit)))
                    .buffered(self.config.max_parallel_fetches)
                    .collect::<Vec<Option<StreamCandidate>>>()
                    .await
                    .into_iter()
                    .flatten()
                    .collect()
            }
            MediaType::Series => {
                stream::iter(hits.into_iter().map(|hit| {
                    self.series_candidates(hit, identity.season, identity.episode)
                }))
                .buffered(self.config.max_parallel_fetches)
                .collect::<Vec<Vec<StreamCandidate>>>()
                .await
                .into_iter()
                .flatten()
                .collect()
            }
        };

        let ranked = rank::dedup_and_rank(candidates);
        info!(streams = ranked.len(), "Resolution complete");
        metrics::STREAMS_RETURNED.observe(ranked.len() as f64);
        ranked
    }

    /// Try queries in order, stopping at the first that yields hits.
    /// A failed query is logged and the loop continues with the next one.
    async fn first_productive_query(&self, queries: &[String]) -> Vec<SearchHit> {
        for (attempt, query) in queries.iter().enumerate() {
            metrics::SEARCH_QUERIES.inc();
            match self.searcher.search(query).await {
                Ok(hits) if !hits.is_empty() => {
                    debug!(query = %query, attempt = attempt + 1, hits = hits.len(), "Query produced hits");
                    return hits;
                }
                Ok(_) => {
                    debug!(query = %query, attempt = attempt + 1, "No results");
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                }
            }
        }
        Vec::new()
    }

    /// One hit, one candidate: movies are played as whole torrents.
    async fn movie_candidate(&self, hit: SearchHit) -> Option<StreamCandidate> {
        if is_multi_season_pack(&hit.name) {
            debug!(name = %hit.name, "Skipping season pack for movie request");
            return None;
        }

        let metadata = match self.metadata.resolve(&hit.download_url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(name = %hit.name, error = %e, "Skipping candidate");
                metrics::METADATA_FAILURES.inc();
                return None;
            }
        };

        Some(streams::assemble_movie(&hit, metadata.info_hash))
    }

    /// One hit, zero or more candidates: series torrents contribute one
    /// candidate per qualifying video file, narrowed to a single file when
    /// a specific episode was requested.
    async fn series_candidates(
        &self,
        hit: SearchHit,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Vec<StreamCandidate> {
        let metadata = match self.metadata.resolve(&hit.download_url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(name = %hit.name, error = %e, "Skipping candidate");
                metrics::METADATA_FAILURES.inc();
                return Vec::new();
            }
        };

        let videos = episode::qualifying_video_files(&metadata.files);
        if videos.is_empty() {
            debug!(name = %hit.name, "No qualifying video files");
            return Vec::new();
        }

        let candidates: Vec<StreamCandidate> = videos
            .iter()
            .map(|file| streams::assemble_series_file(&hit, &metadata.info_hash, file))
            .collect();

        if let (Some(season), Some(episode)) = (season, episode) {
            episode::pick_episode_candidate(&candidates, season, episode)
                .map(|c| vec![c])
                .unwrap_or_default()
        } else {
            candidates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_config_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_parallel_fetches, 5);
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_resolver_config_serde_defaults() {
        let config: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_parallel_fetches, 5);

        let config: ResolverConfig =
            serde_json::from_str(r#"{"max_parallel_fetches": 2}"#).unwrap();
        assert_eq!(config.max_parallel_fetches, 2);
        assert_eq!(config.fetch_timeout_secs, 10);
    }
}
