//! Addon manifest.
//!
//! Clients fetch this once to learn what the addon serves: stream results
//! for movies and series, addressed by IMDb-style or TMDB-style ids. The
//! catalog entries are stubs - the addon serves no browsable catalog, but
//! listing the types keeps it linkable from client UIs.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub types: Vec<&'static str>,
    pub catalogs: Vec<CatalogEntry>,
    pub resources: Vec<&'static str>,
    pub id_prefixes: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

fn build_manifest() -> Manifest {
    Manifest {
        id: "community.riptide",
        version: env!("CARGO_PKG_VERSION"),
        name: "Riptide",
        description: "Streams movies and series from a torrent index",
        types: vec!["movie", "series"],
        catalogs: vec![
            CatalogEntry {
                media_type: "movie",
                id: "riptide-movie",
                name: "Riptide Movies",
            },
            CatalogEntry {
                media_type: "series",
                id: "riptide-series",
                name: "Riptide Series",
            },
        ],
        resources: vec!["stream"],
        id_prefixes: vec!["tt", "tmdb:"],
    }
}

pub async fn manifest() -> Json<Manifest> {
    Json(build_manifest())
}
