//! Title lookup and normalization.
//!
//! This module provides the [`TitleProvider`] trait with two interchangeable
//! implementations (IMDb-style scraping, TMDB-style API) plus the pure string
//! transforms shared by the query generator and the episode matcher.

mod imdb;
pub mod normalize;
mod tmdb;
mod types;

pub use imdb::{ImdbClient, ImdbConfig};
pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::{TitleError, TitleInfo, TitleProvider};
