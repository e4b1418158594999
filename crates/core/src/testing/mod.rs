//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits
//! (title provider, searcher, metadata resolver), allowing the full
//! resolution pipeline to be exercised without real infrastructure.

mod mock_metadata;
mod mock_searcher;
mod mock_titles;

pub use mock_metadata::MockMetadataResolver;
pub use mock_searcher::MockSearcher;
pub use mock_titles::MockTitleProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::SearchHit;
    use crate::titles::TitleInfo;
    use crate::torrent::{TorrentFileEntry, TorrentMetadata};

    /// Create a test search hit with reasonable defaults.
    pub fn search_hit(name: &str, torrent_id: &str, seeders: u32) -> SearchHit {
        SearchHit {
            name: name.to_string(),
            torrent_id: torrent_id.to_string(),
            size: "1.4 GB".to_string(),
            seeders,
            category: "Filmy CZ/SK".to_string(),
            download_url: format!("https://index.example/torrent/download.php?id={}", torrent_id),
        }
    }

    /// Create a test search hit in the series category.
    pub fn series_hit(name: &str, torrent_id: &str, seeders: u32) -> SearchHit {
        let mut hit = search_hit(name, torrent_id, seeders);
        hit.category = "Seriály".to_string();
        hit
    }

    /// Create test title info without an episode title.
    pub fn title_info(title: &str) -> TitleInfo {
        TitleInfo::new(title, title)
    }

    /// Create single-file torrent metadata.
    pub fn single_file_metadata(info_hash: &str, file_name: &str) -> TorrentMetadata {
        TorrentMetadata {
            info_hash: info_hash.to_string(),
            files: vec![TorrentFileEntry {
                path: file_name.to_string(),
                size_bytes: 700 * 1024 * 1024,
                index: 0,
            }],
        }
    }

    /// Create multi-file torrent metadata, one 700 MB entry per file name.
    pub fn multi_file_metadata(info_hash: &str, file_names: &[&str]) -> TorrentMetadata {
        TorrentMetadata {
            info_hash: info_hash.to_string(),
            files: file_names
                .iter()
                .enumerate()
                .map(|(index, name)| TorrentFileEntry {
                    path: format!("Show/{}", name),
                    size_bytes: 700 * 1024 * 1024,
                    index: index as u32,
                })
                .collect(),
        }
    }

    /// A plausible 40-hex info hash built from a single repeated digit.
    pub fn info_hash(digit: char) -> String {
        std::iter::repeat(digit).take(40).collect()
    }
}
