//! Torrent metadata resolution.
//!
//! Turns a hit's download URL into the content identifier (info-hash) and
//! file listing the playback layer needs. Fetching is authenticated with the
//! same session credential as search; parsing is pure.

mod fetcher;
mod parser;

pub use fetcher::{HttpMetadataResolver, MetadataError, MetadataResolver};
pub use parser::{parse_metadata, TorrentParseError};

use serde::{Deserialize, Serialize};

/// Parsed metadata for one torrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentMetadata {
    /// SHA-1 of the bencoded `info` dictionary, 40 lowercase hex chars.
    pub info_hash: String,
    /// Member files in original order. Single-file torrents have exactly
    /// one entry with index 0.
    pub files: Vec<TorrentFileEntry>,
}

impl TorrentMetadata {
    /// Whether this torrent bundles more than one file.
    pub fn is_multi_file(&self) -> bool {
        self.files.len() > 1
    }
}

/// A file within a torrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentFileEntry {
    /// Path within the torrent (root name included for multi-file).
    pub path: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Zero-based position in the torrent's file list.
    pub index: u32,
}

impl TorrentFileEntry {
    /// Final path component, used for episode tag matching.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
