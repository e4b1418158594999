//! Stream candidate assembly.
//!
//! Builds the display title, binge group key and language flags for one
//! candidate out of a search hit and its resolved torrent metadata.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::searcher::SearchHit;
use crate::torrent::TorrentFileEntry;

use super::episode::episode_label;
use super::StreamCandidate;

static DOWNLOAD_PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Stiahni si\s*").unwrap());
static LANG_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2}\b").unwrap());

/// Flag glyph for a two-letter language code found in release names.
fn flag_for_language(code: &str) -> Option<&'static str> {
    match code {
        "CZ" => Some("\u{1F1E8}\u{1F1FF}"),
        "SK" => Some("\u{1F1F8}\u{1F1F0}"),
        "EN" => Some("\u{1F1EC}\u{1F1E7}"),
        "US" => Some("\u{1F1FA}\u{1F1F8}"),
        "DE" => Some("\u{1F1E9}\u{1F1EA}"),
        "FR" => Some("\u{1F1EB}\u{1F1F7}"),
        "IT" => Some("\u{1F1EE}\u{1F1F9}"),
        "ES" => Some("\u{1F1EA}\u{1F1F8}"),
        "RU" => Some("\u{1F1F7}\u{1F1FA}"),
        "PL" => Some("\u{1F1F5}\u{1F1F1}"),
        "HU" => Some("\u{1F1ED}\u{1F1FA}"),
        "JP" => Some("\u{1F1EF}\u{1F1F5}"),
        "KR" => Some("\u{1F1F0}\u{1F1F7}"),
        "CN" => Some("\u{1F1E8}\u{1F1F3}"),
        _ => None,
    }
}

/// Flags for every recognized two-letter language code in a release name.
pub fn language_flags(name: &str) -> Vec<&'static str> {
    LANG_CODE_RE
        .find_iter(name)
        .filter_map(|m| flag_for_language(m.as_str()))
        .collect()
}

/// Clean a release name into the binge group key: drop the index's leading
/// download phrase and a leading echo of the category label.
pub fn clean_release_name(name: &str, category: &str) -> String {
    let mut cleaned = DOWNLOAD_PHRASE_RE.replace(name, "").trim().to_string();

    let category = category.trim();
    if !category.is_empty()
        && cleaned.to_lowercase().starts_with(&category.to_lowercase())
    {
        let cut = cleaned
            .char_indices()
            .nth(category.chars().count())
            .map(|(i, _)| i)
            .unwrap_or(cleaned.len());
        cleaned = cleaned[cut..].trim().to_string();
    }

    cleaned
}

fn flags_line(name: &str) -> String {
    let flags = language_flags(name);
    if flags.is_empty() {
        String::new()
    } else {
        format!("\n{}", flags.join(" / "))
    }
}

/// Build the single candidate for a movie torrent.
pub fn assemble_movie(hit: &SearchHit, info_hash: String) -> StreamCandidate {
    let group_key = clean_release_name(&hit.name, &hit.category);
    let display_title = format!(
        "{}\n\u{1F464} {}  \u{1F4C0} {}{}",
        group_key,
        hit.seeders,
        hit.size,
        flags_line(&hit.name)
    );

    StreamCandidate {
        display_title,
        group_key,
        info_hash,
        file_index: None,
        seeders: hit.seeders,
        category: hit.category.clone(),
    }
}

/// Build the candidate for one file of a series torrent.
///
/// The episode tag extracted from the file name (when any) goes into the
/// title so the matching cascade and the user both see it.
pub fn assemble_series_file(
    hit: &SearchHit,
    info_hash: &str,
    file: &TorrentFileEntry,
) -> StreamCandidate {
    let group_key = clean_release_name(&hit.name, &hit.category);
    let file_name = file.file_name();

    let label_suffix = episode_label(file_name)
        .map(|label| format!(" {}", label))
        .unwrap_or_default();

    let display_title = format!(
        "{}{}\n\u{1F39E}\u{FE0F} {}\n\u{1F464} {}  \u{1F4BD} {}{}",
        group_key,
        label_suffix,
        file_name,
        hit.seeders,
        hit.size,
        flags_line(&hit.name)
    );

    StreamCandidate {
        display_title,
        group_key,
        info_hash: info_hash.to_string(),
        file_index: Some(file.index),
        seeders: hit.seeders,
        category: hit.category.clone(),
    }
}
