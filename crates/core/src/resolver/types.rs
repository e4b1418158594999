//! Types for the resolution pipeline output.

use serde::{Deserialize, Serialize};

/// One playable stream candidate.
///
/// `seeders` is carried as a first-class numeric field so ranking never has
/// to re-derive it from rendered display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCandidate {
    /// Multi-line display title shown to the user (release name, seeder and
    /// size summary, language flags).
    pub display_title: String,
    /// Cleaned release title; playback clients group consecutively numbered
    /// episodes under the same key for binge watching.
    pub group_key: String,
    /// Content identifier: SHA-1 of the torrent's `info` dictionary,
    /// 40 lowercase hex chars.
    pub info_hash: String,
    /// Index of the file to play within the torrent. Always present for
    /// candidates built from a torrent's file list; absent for whole-torrent
    /// movie candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_index: Option<u32>,
    /// Seeder count from the search listing, used for ranking.
    pub seeders: u32,
    /// Category label from the search listing, used for display.
    pub category: String,
}
