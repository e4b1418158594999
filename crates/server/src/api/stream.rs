//! Stream and catalog handlers.
//!
//! The stream route is a direct projection of the engine's candidate list
//! into the addon JSON shape; the catalog route is a protocol-required stub.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use riptide_core::{MediaType, StreamCandidate};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEntry {
    /// Addon label plus the index category, shown as the source column.
    pub name: String,
    /// Multi-line display title.
    pub title: String,
    pub info_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_idx: Option<u32>,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub binge_group: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<serde_json::Value>,
}

impl From<StreamCandidate> for StreamEntry {
    fn from(candidate: StreamCandidate) -> Self {
        Self {
            name: format!("Riptide\n{}", candidate.category),
            title: candidate.display_title,
            info_hash: candidate.info_hash,
            file_idx: candidate.file_index,
            behavior_hints: BehaviorHints {
                binge_group: candidate.group_key,
            },
        }
    }
}

pub async fn stream(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    let Some(media_type) = MediaType::from_path_segment(&media_type) else {
        debug!(media_type = %media_type, "Unsupported media type");
        return Json(StreamsResponse { streams: vec![] });
    };

    // clients request "/stream/movie/tt123.json"
    let id = id.strip_suffix(".json").unwrap_or(&id);

    let candidates = state.resolver().resolve(media_type, id).await;
    let streams = candidates.into_iter().map(StreamEntry::from).collect();

    Json(StreamsResponse { streams })
}

pub async fn catalog(Path((media_type, id)): Path<(String, String)>) -> Json<CatalogResponse> {
    debug!(media_type = %media_type, id = %id, "Catalog request (always empty)");
    Json(CatalogResponse { metas: vec![] })
}
