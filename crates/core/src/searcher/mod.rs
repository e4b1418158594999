//! Torrent index search.
//!
//! This module provides the [`Searcher`] trait and the HTML scraping client
//! for the configured torrent index.

mod index;
mod types;

pub use index::IndexSearcher;
pub use types::*;
