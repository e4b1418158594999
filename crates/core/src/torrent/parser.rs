//! Torrent metainfo parsing.
//!
//! Uses librqbit-core to decode bencoded `.torrent` payloads. The content
//! identifier is the SHA-1 of the raw bytes of the encoded `info` dictionary,
//! which librqbit-core computes over the original byte span during decoding,
//! so the digest always matches what a compliant decoder would produce.

use librqbit_core::torrent_metainfo::{torrent_from_bytes, TorrentMetaV1Owned};
use thiserror::Error;

use super::{TorrentFileEntry, TorrentMetadata};

/// Errors that can occur when parsing torrent payloads.
#[derive(Debug, Error)]
pub enum TorrentParseError {
    #[error("Failed to decode torrent: {0}")]
    Decode(String),

    #[error("Empty torrent (no files)")]
    EmptyTorrent,
}

/// Parse a raw `.torrent` payload into content identifier and file list.
///
/// Multi-file torrents keep their original file order; each entry carries
/// its zero-based index, which is what playback clients address files by.
/// Single-file torrents synthesize a one-entry list with index 0.
pub fn parse_metadata(bytes: &[u8]) -> Result<TorrentMetadata, TorrentParseError> {
    let torrent: TorrentMetaV1Owned =
        torrent_from_bytes(bytes).map_err(|e| TorrentParseError::Decode(e.to_string()))?;

    let info_hash = torrent.info_hash.as_string();
    let info = &torrent.info;

    let root_name = info
        .name
        .as_ref()
        .map(|b| bytes_to_string(b.as_ref()))
        .unwrap_or_else(|| "unknown".to_string());

    if let Some(ref files) = info.files {
        let mut entries = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            let mut path_parts = vec![root_name.clone()];
            for part in &file.path {
                path_parts.push(bytes_to_string(part.as_ref()));
            }

            entries.push(TorrentFileEntry {
                path: path_parts.join("/"),
                size_bytes: file.length,
                index: index as u32,
            });
        }

        if entries.is_empty() {
            return Err(TorrentParseError::EmptyTorrent);
        }

        Ok(TorrentMetadata {
            info_hash,
            files: entries,
        })
    } else if let Some(length) = info.length {
        Ok(TorrentMetadata {
            info_hash,
            files: vec![TorrentFileEntry {
                path: root_name,
                size_bytes: length,
                index: 0,
            }],
        })
    } else {
        Err(TorrentParseError::EmptyTorrent)
    }
}

/// Convert bytes to a UTF-8 string, falling back to lossy conversion for
/// the occasional legacy-encoded torrent.
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal but valid single-file metainfo: 1024-byte file, one 20-byte
    // piece hash placeholder.
    fn single_file_torrent() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"d8:announce26:http://tracker.example/ann4:info");
        data.extend_from_slice(
            b"d6:lengthi1024e4:name8:test.mkv12:piece lengthi16384e6:pieces20:AAAAAAAAAAAAAAAAAAAAe",
        );
        data.extend_from_slice(b"e");
        data
    }

    // Two-file metainfo under a shared root directory.
    fn multi_file_torrent() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"d8:announce26:http://tracker.example/ann4:info");
        data.extend_from_slice(b"d5:filesl");
        data.extend_from_slice(b"d6:lengthi52428800e4:pathl14:ep1.S01E01.mkvee");
        data.extend_from_slice(b"d6:lengthi52428801e4:pathl14:ep2.S01E02.mkvee");
        data.extend_from_slice(b"e4:name4:Show12:piece lengthi16384e6:pieces20:AAAAAAAAAAAAAAAAAAAAe");
        data.extend_from_slice(b"e");
        data
    }

    #[test]
    fn test_parse_single_file() {
        let metadata = parse_metadata(&single_file_torrent()).unwrap();

        assert_eq!(metadata.files.len(), 1);
        assert_eq!(metadata.files[0].path, "test.mkv");
        assert_eq!(metadata.files[0].size_bytes, 1024);
        assert_eq!(metadata.files[0].index, 0);
    }

    #[test]
    fn test_parse_multi_file_keeps_order_and_indexes() {
        let metadata = parse_metadata(&multi_file_torrent()).unwrap();

        assert_eq!(metadata.files.len(), 2);
        assert_eq!(metadata.files[0].path, "Show/ep1.S01E01.mkv");
        assert_eq!(metadata.files[0].index, 0);
        assert_eq!(metadata.files[1].path, "Show/ep2.S01E02.mkv");
        assert_eq!(metadata.files[1].index, 1);
        assert_eq!(metadata.files[1].size_bytes, 52428801);
    }

    #[test]
    fn test_info_hash_shape() {
        let metadata = parse_metadata(&single_file_torrent()).unwrap();

        assert_eq!(metadata.info_hash.len(), 40);
        assert!(metadata
            .info_hash
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_info_hash_stable_across_parses() {
        let a = parse_metadata(&single_file_torrent()).unwrap();
        let b = parse_metadata(&single_file_torrent()).unwrap();
        assert_eq!(a.info_hash, b.info_hash);

        let multi = parse_metadata(&multi_file_torrent()).unwrap();
        assert_ne!(a.info_hash, multi.info_hash);
    }

    #[test]
    fn test_parse_invalid_payload() {
        assert!(matches!(
            parse_metadata(b"not a valid torrent"),
            Err(TorrentParseError::Decode(_))
        ));
        assert!(parse_metadata(b"").is_err());
    }

    #[test]
    fn test_bytes_to_string_lossy_fallback() {
        let invalid = vec![0xff, 0xfe, b'h', b'i'];
        let result = bytes_to_string(&invalid);
        assert!(result.contains("hi"));
    }
}
