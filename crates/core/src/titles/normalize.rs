//! Pure string transforms for release and title matching.
//!
//! Everything here is side-effect free; the query generator and the episode
//! matcher both build on these primitives.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static MULTI_SEASON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(S\d{2}E\d{2}-\d{2}|Complete|All Episodes|Season \d+(-\d+)?)").unwrap()
});

static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());

static TV_SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)TV (Mini )?Series").unwrap());

/// Strip diacritics via canonical decomposition, dropping combining marks.
///
/// Idempotent: applying it twice equals applying it once.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// First `words` whitespace-delimited tokens of a title.
pub fn shorten(s: &str, words: usize) -> String {
    s.split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compact matching key: diacritics stripped, whitespace/colon/apostrophe
/// removed, lowercased. Not meant for display.
pub fn normalize_key(s: &str) -> String {
    strip_diacritics(s)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '\'')
        .collect::<String>()
        .to_lowercase()
}

/// Whether a release name looks like a season pack or a whole-series bundle
/// rather than a single episode or movie.
pub fn is_multi_season_pack(name: &str) -> bool {
    MULTI_SEASON_RE.is_match(name)
}

/// Clean a catalog title for searching: drop parenthetical annotations
/// (release years and the like) and the "TV (Mini )Series" phrase, then
/// normalize whitespace.
pub fn clean_title(s: &str) -> String {
    let s = PARENTHETICAL_RE.replace_all(s, "");
    let s = TV_SERIES_RE.replace_all(&s, "");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Případ pro exorcistu"), "Pripad pro exorcistu");
        assert_eq!(strip_diacritics("Amélie"), "Amelie");
        assert_eq!(strip_diacritics("no accents"), "no accents");
    }

    #[test]
    fn test_strip_diacritics_idempotent() {
        let once = strip_diacritics("Škola základ života");
        assert_eq!(strip_diacritics(&once), once);
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("The Lord of the Rings", 3), "The Lord of");
        assert_eq!(shorten("Up", 3), "Up");
        assert_eq!(shorten("", 3), "");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Marvel's Agents: Of SHIELD"), "marvelsagentsofshield");
        assert_eq!(normalize_key("Ordinace v růžové zahradě"), "ordinacevruzovezahrade");
    }

    #[test]
    fn test_normalize_key_idempotent() {
        let once = normalize_key("L'Été: Indien");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn test_is_multi_season_pack() {
        assert!(is_multi_season_pack("Show S01E01-12 CZ"));
        assert!(is_multi_season_pack("Show Complete Season 1-3"));
        assert!(is_multi_season_pack("Show all episodes 720p"));
        assert!(is_multi_season_pack("Show Season 2"));
        assert!(!is_multi_season_pack("Show S01E05 1080p"));
        assert!(!is_multi_season_pack("Some Movie 2020"));
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Dune (2021)"), "Dune");
        assert_eq!(clean_title("Chernobyl TV Mini Series"), "Chernobyl");
        assert_eq!(clean_title("The Office (US) TV Series"), "The Office");
        assert_eq!(clean_title("  Plain Title  "), "Plain Title");
    }
}
