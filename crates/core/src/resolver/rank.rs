//! Final ordering of stream candidates.

use std::collections::HashSet;

use super::StreamCandidate;

/// Deduplicate by `(info_hash, file_index)` and sort by seeders descending.
///
/// First occurrence wins on duplicates. The sort is stable, so candidates
/// with equal seeder counts keep their relative input order.
pub fn dedup_and_rank(candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
    let mut seen: HashSet<(String, Option<u32>)> = HashSet::new();
    let mut unique: Vec<StreamCandidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let key = (candidate.info_hash.clone(), candidate.file_index);
        if seen.insert(key) {
            unique.push(candidate);
        }
    }

    unique.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(info_hash: &str, file_index: Option<u32>, seeders: u32) -> StreamCandidate {
        StreamCandidate {
            display_title: format!("candidate {}", seeders),
            group_key: "group".to_string(),
            info_hash: info_hash.to_string(),
            file_index,
            seeders,
            category: "Filmy CZ/SK".to_string(),
        }
    }

    #[test]
    fn test_dedup_by_hash_and_index() {
        let ranked = dedup_and_rank(vec![
            candidate("aaa", Some(0), 10),
            candidate("aaa", Some(0), 99), // duplicate key, dropped
            candidate("aaa", Some(1), 5),  // same hash, different file
            candidate("bbb", Some(0), 7),
        ]);

        assert_eq!(ranked.len(), 3);
        let keys: HashSet<_> = ranked
            .iter()
            .map(|c| (c.info_hash.clone(), c.file_index))
            .collect();
        assert_eq!(keys.len(), 3);
        // first occurrence won
        assert!(ranked
            .iter()
            .any(|c| c.info_hash == "aaa" && c.file_index == Some(0) && c.seeders == 10));
    }

    #[test]
    fn test_none_and_zero_file_index_are_distinct() {
        let ranked = dedup_and_rank(vec![
            candidate("aaa", None, 10),
            candidate("aaa", Some(0), 10),
        ]);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_sorted_by_seeders_descending() {
        let ranked = dedup_and_rank(vec![
            candidate("aaa", None, 3),
            candidate("bbb", None, 50),
            candidate("ccc", None, 12),
        ]);

        let seeders: Vec<u32> = ranked.iter().map(|c| c.seeders).collect();
        assert_eq!(seeders, vec![50, 12, 3]);
    }

    #[test]
    fn test_equal_seeders_keep_input_order() {
        let mut first = candidate("aaa", None, 9);
        first.display_title = "first".to_string();
        let mut second = candidate("bbb", None, 9);
        second.display_title = "second".to_string();
        let mut third = candidate("ccc", None, 9);
        third.display_title = "third".to_string();

        let ranked = dedup_and_rank(vec![first, second, third]);
        let titles: Vec<&str> = ranked.iter().map(|c| c.display_title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_and_rank(Vec::new()).is_empty());
    }
}
