//! Episode matching within multi-file torrents.
//!
//! File names in the wild tag episodes in many ways (S01E02, 1x02, Ep2,
//! bare broadcast numbers). Matching runs as an explicit ordered cascade of
//! patterns, strictest first; each level is a pure predicate over the
//! assembled candidate title, so the precedence is independently testable.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::torrent::TorrentFileEntry;

use super::StreamCandidate;

/// Extensions recognized as playable video.
pub const VIDEO_EXTENSIONS: [&str; 9] = [
    ".mp4", ".mkv", ".avi", ".mov", ".webm", ".mpeg", ".mpg", ".ts", ".flv",
];

/// Size floor excluding samples, subtitle files and other junk.
pub const MIN_VIDEO_FILE_BYTES: u64 = 20 * 1024 * 1024;

static EPISODE_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S?0?(\d+)[ ._xX-]?E?0?(\d+)").unwrap());
static BARE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{3,4})\b").unwrap());
static E_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bE0?(\d+)\b").unwrap());

/// Files that qualify as playable episodes: recognized video extension and
/// size above the floor.
pub fn qualifying_video_files(files: &[TorrentFileEntry]) -> Vec<&TorrentFileEntry> {
    files
        .iter()
        .filter(|f| {
            let name = f.path.to_lowercase();
            VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
                && f.size_bytes > MIN_VIDEO_FILE_BYTES
        })
        .collect()
}

/// Extract an episode tag from a file name, most specific pattern first:
/// season+episode pair, bare 3-4 digit run, then `E<num>`. Returns the whole
/// match, uppercased, for display.
pub fn episode_label(file_name: &str) -> Option<String> {
    for re in [&*EPISODE_PAIR_RE, &*BARE_NUMBER_RE, &*E_NUMBER_RE] {
        if let Some(m) = re.find(file_name) {
            return Some(m.as_str().to_uppercase());
        }
    }
    None
}

/// The ordered matching cascade for a requested season/episode.
///
/// Levels, strictest first: exact zero-padded tag, loose season/episode pair
/// with optional separators, `Ep`-style word, then two numeric word-boundary
/// fallbacks.
fn cascade_patterns(season: u32, episode: u32) -> Vec<Regex> {
    [
        format!(r"(?i)S{:02}E{:02}", season, episode),
        format!(r"(?i)S?0?{}[ ._xX-]?E?0?{}", season, episode),
        format!(r"(?i)\bEp?\.?\s*0?{}\b", episode),
        format!(r"(?i)\b\s{}\b", episode),
        format!(r"(?i)\b{}\b", episode),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

/// Pick the candidate matching the requested episode.
///
/// The first candidate satisfying any cascade level wins; when nothing
/// matches, the first candidate is the best-effort default - a poorly
/// tagged but otherwise valid release should still be playable.
pub fn pick_episode_candidate(
    candidates: &[StreamCandidate],
    season: u32,
    episode: u32,
) -> Option<StreamCandidate> {
    for pattern in cascade_patterns(season, episode) {
        if let Some(found) = candidates.iter().find(|c| pattern.is_match(&c.display_title)) {
            return Some(found.clone());
        }
    }
    candidates.first().cloned()
}
