//! Fallback query generation.
//!
//! The search provider does exact/fuzzy substring matching with no stemming,
//! so a single query string rarely finds every release of a title. The
//! generator emits an ordered sequence of variants, most specific first, and
//! the engine stops at the first query that produces hits.

use std::collections::HashSet;

use crate::identity::MediaType;
use crate::titles::normalize::{clean_title, normalize_key, shorten, strip_diacritics};
use crate::titles::TitleInfo;

/// Configuration for the query generator.
#[derive(Debug, Clone)]
pub struct QueryGeneratorConfig {
    /// Word count for the shortened-title variants.
    pub shorten_words: usize,
    /// Episode numbers above this within season 1 indicate daily numbering.
    pub daily_season_threshold: u32,
    /// Episode numbers above this always indicate daily numbering.
    pub daily_absolute_threshold: u32,
}

impl Default for QueryGeneratorConfig {
    fn default() -> Self {
        Self {
            shorten_words: 3,
            daily_season_threshold: 100,
            daily_absolute_threshold: 1000,
        }
    }
}

/// Generates search query variants for one resolution request.
pub struct QueryGenerator {
    config: QueryGeneratorConfig,
}

/// Insertion-ordered string set: first occurrence wins, empties dropped.
#[derive(Default)]
struct QuerySet {
    queries: Vec<String>,
    seen: HashSet<String>,
}

impl QuerySet {
    fn add(&mut self, query: String) {
        if !query.is_empty() && self.seen.insert(query.clone()) {
            self.queries.push(query);
        }
    }
}

impl QueryGenerator {
    /// Create a generator with default config.
    pub fn new() -> Self {
        Self {
            config: QueryGeneratorConfig::default(),
        }
    }

    /// Create a generator with custom config.
    pub fn with_config(config: QueryGeneratorConfig) -> Self {
        Self { config }
    }

    /// Build the deduplicated, insertion-ordered query sequence.
    ///
    /// The output is deterministic for identical inputs.
    pub fn build(
        &self,
        titles: &TitleInfo,
        media_type: MediaType,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Vec<String> {
        let mut base_titles: Vec<String> = Vec::new();
        for raw in [&titles.title, &titles.original_title] {
            let cleaned = clean_title(raw);
            if !cleaned.is_empty() && !base_titles.contains(&cleaned) {
                base_titles.push(cleaned);
            }
        }

        let mut set = QuerySet::default();

        match (media_type, season, episode) {
            (MediaType::Series, Some(s), Some(e)) => {
                self.series_episode_queries(
                    &mut set,
                    &base_titles,
                    titles.episode_title.as_deref(),
                    s,
                    e,
                );
            }
            (MediaType::Series, _, _) => {
                self.series_queries(&mut set, &base_titles);
            }
            (MediaType::Movie, _, _) => {
                self.movie_queries(&mut set, &base_titles);
            }
        }

        set.queries
    }

    fn movie_queries(&self, set: &mut QuerySet, base_titles: &[String]) {
        for base in base_titles {
            set.add(base.clone());
            set.add(strip_diacritics(base));
            set.add(dotted(base));
        }
    }

    fn series_queries(&self, set: &mut QuerySet, base_titles: &[String]) {
        for base in base_titles {
            let no_dia = strip_diacritics(base);
            set.add(format!("{} Complete", base));
            set.add(format!("{} All Episodes", base));
            set.add(format!("{} Season", base));
            set.add(format!("{} Season", no_dia));
            set.add(dotted(base));
        }
    }

    fn series_episode_queries(
        &self,
        set: &mut QuerySet,
        base_titles: &[String],
        episode_title: Option<&str>,
        season: u32,
        episode: u32,
    ) {
        // Serial dramas are numbered by broadcast day, not season/episode
        // pairs; SxxEyy tags would never match those releases.
        let daily = (season == 1 && episode > self.config.daily_season_threshold)
            || episode > self.config.daily_absolute_threshold;

        for base in base_titles {
            let no_dia = strip_diacritics(base);
            let short = shorten(&no_dia, self.config.shorten_words);
            let episode_tag = format!("S{:02}E{:02}", season, episode);

            let mut variants: Vec<String> = Vec::new();

            if daily {
                variants.push(format!("{} {}", base, episode));
                variants.push(format!("{} ep{}", base, episode));
                variants.push(format!("{} e{}", base, episode));
                variants.push(format!("{} {}", no_dia, episode));
                variants.push(format!("{} {}", short, episode));
            } else {
                variants.push(format!("{} {}", base, episode_tag));
                variants.push(format!("{} E{}", base, episode));
                variants.push(format!("{} Ep{}", base, episode));
                variants.push(format!("{} {}x{}", base, season, episode));
                variants.push(format!("{} {}.{}", base, season, episode));
                variants.push(format!("{} {}", no_dia, episode_tag));
                variants.push(format!("{}{}", normalize_key(base), episode_tag));
                variants.push(format!("{} E{}", no_dia, episode));
                variants.push(format!("{} E{}", short, episode));
            }

            if let Some(ep_title) = episode_title {
                variants.push(format!("{} {}", base, ep_title));
                variants.push(format!("{} {}", no_dia, ep_title));
                variants.push(format!("{} {}", short, ep_title));
            }

            // Separator style matters to the provider, so every variant also
            // gets a punctuation-stripped and a dot-joined copy.
            for variant in &variants {
                set.add(variant.clone());
                set.add(strip_punctuation(variant));
                set.add(dotted(variant));
            }
        }

        // Season-pack fallbacks: a pack can satisfy a single-episode request
        // when no exact episode release exists.
        for base in base_titles {
            let fallbacks = [
                format!("{} S{:02}", base, season),
                format!("{} Season {}", base, season),
                format!("{} Season {} Complete", base, season),
                format!("{} Complete", base),
                format!("{} All Episodes", base),
            ];
            for fallback in fallbacks {
                set.add(fallback.clone());
                set.add(dotted(&fallback));
            }
        }
    }
}

impl Default for QueryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Spaces replaced by dots (release-name separator style).
fn dotted(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(".")
}

/// Apostrophes and colons removed.
fn strip_punctuation(s: &str) -> String {
    s.chars().filter(|c| *c != '\'' && *c != ':').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(title: &str, original: &str) -> TitleInfo {
        TitleInfo::new(title, original)
    }

    #[test]
    fn test_movie_variants() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Želary (2003)", "Želary"),
            MediaType::Movie,
            None,
            None,
        );

        assert_eq!(queries[0], "Želary");
        assert!(queries.contains(&"Zelary".to_string()));
        // single-word title: dotted copy equals the base, so it is deduped
        assert_eq!(queries.len(), 2);
    }

    #[test]
    fn test_movie_multi_word_dotted() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("The Deep End", "The Deep End"),
            MediaType::Movie,
            None,
            None,
        );

        assert_eq!(
            queries,
            vec!["The Deep End".to_string(), "The.Deep.End".to_string()]
        );
    }

    #[test]
    fn test_series_without_episode() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Okres na severu", "Okres na severu"),
            MediaType::Series,
            None,
            None,
        );

        assert_eq!(queries[0], "Okres na severu Complete");
        assert!(queries.contains(&"Okres na severu All Episodes".to_string()));
        assert!(queries.contains(&"Okres na severu Season".to_string()));
        assert!(queries.contains(&"Okres.na.severu".to_string()));
    }

    #[test]
    fn test_series_episode_most_specific_first() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Dark", "Dark"),
            MediaType::Series,
            Some(2),
            Some(5),
        );

        assert_eq!(queries[0], "Dark S02E05");
        assert!(queries.contains(&"Dark E5".to_string()));
        assert!(queries.contains(&"Dark Ep5".to_string()));
        assert!(queries.contains(&"Dark 2x5".to_string()));
        assert!(queries.contains(&"Dark 2.5".to_string()));
        assert!(queries.contains(&"darkS02E05".to_string()));
        assert!(queries.contains(&"Dark.S02E05".to_string()));
    }

    #[test]
    fn test_series_episode_season_pack_fallbacks_last() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Dark", "Dark"),
            MediaType::Series,
            Some(1),
            Some(3),
        );

        let pack_pos = queries
            .iter()
            .position(|q| q == "Dark Season 1 Complete")
            .unwrap();
        let exact_pos = queries.iter().position(|q| q == "Dark S01E03").unwrap();
        assert!(exact_pos < pack_pos);
        assert!(queries.contains(&"Dark S01".to_string()));
        assert!(queries.contains(&"Dark Complete".to_string()));
        assert!(queries.contains(&"Dark All Episodes".to_string()));
    }

    #[test]
    fn test_daily_numbering_detection() {
        let generator = QueryGenerator::new();

        // season 1, episode far beyond any normal season length
        let queries = generator.build(
            &titles("Ulice", "Ulice"),
            MediaType::Series,
            Some(1),
            Some(2500),
        );
        assert!(queries.contains(&"Ulice 2500".to_string()));
        assert!(queries.contains(&"Ulice ep2500".to_string()));
        assert!(queries.contains(&"Ulice e2500".to_string()));
        assert!(!queries.iter().any(|q| q.contains("S01E")));

        // normal numbering is unaffected
        let queries = generator.build(
            &titles("Ulice", "Ulice"),
            MediaType::Series,
            Some(2),
            Some(12),
        );
        assert!(queries.contains(&"Ulice S02E12".to_string()));
    }

    #[test]
    fn test_episode_title_variants() {
        let mut info = titles("Přátelé", "Friends");
        info.episode_title = Some("The One with the Embryos".to_string());

        let generator = QueryGenerator::new();
        let queries = generator.build(&info, MediaType::Series, Some(4), Some(12));

        assert!(queries.contains(&"Přátelé The One with the Embryos".to_string()));
        assert!(queries.contains(&"Pratele The One with the Embryos".to_string()));
        assert!(queries.contains(&"Friends The One with the Embryos".to_string()));
    }

    #[test]
    fn test_punctuation_stripped_copies() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Marvel's Agents: Of SHIELD", "Marvel's Agents: Of SHIELD"),
            MediaType::Series,
            Some(1),
            Some(2),
        );

        assert!(queries.contains(&"Marvel's Agents: Of SHIELD S01E02".to_string()));
        assert!(queries.contains(&"Marvels Agents Of SHIELD S01E02".to_string()));
        assert!(queries.contains(&"Marvel's.Agents:.Of.SHIELD.S01E02".to_string()));
    }

    #[test]
    fn test_identical_titles_collapse() {
        let generator = QueryGenerator::new();
        let same = generator.build(
            &titles("Dark (2017)", "Dark"),
            MediaType::Movie,
            None,
            None,
        );
        // clean("Dark (2017)") == clean("Dark"), so one base title only
        assert_eq!(same, vec!["Dark".to_string()]);
    }

    #[test]
    fn test_no_duplicate_queries() {
        let generator = QueryGenerator::new();
        let queries = generator.build(
            &titles("Tři oříšky pro Popelku", "Tri orisky pro Popelku"),
            MediaType::Series,
            Some(1),
            Some(1),
        );

        let unique: std::collections::HashSet<_> = queries.iter().collect();
        assert_eq!(queries.len(), unique.len());
    }

    #[test]
    fn test_deterministic_output() {
        let generator = QueryGenerator::new();
        let info = titles("Penguin Town", "Penguin Town");
        let a = generator.build(&info, MediaType::Series, Some(1), Some(4));
        let b = generator.build(&info, MediaType::Series, Some(1), Some(4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_thresholds() {
        let generator = QueryGenerator::with_config(QueryGeneratorConfig {
            shorten_words: 2,
            daily_season_threshold: 10,
            daily_absolute_threshold: 1000,
        });
        let queries = generator.build(
            &titles("Some Long Show Name", "Some Long Show Name"),
            MediaType::Series,
            Some(1),
            Some(11),
        );
        // threshold of 10 makes episode 11 daily-numbered
        assert!(queries.contains(&"Some Long Show Name 11".to_string()));
        assert!(queries.contains(&"Some Long 11".to_string()));
    }
}
