use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, manifest, stream};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Addon protocol routes live at the root; clients fetch them
    // cross-origin, so CORS must be permissive.
    let addon_routes = Router::new()
        .route("/manifest.json", get(manifest::manifest))
        .route("/stream/{media_type}/{id}", get(stream::stream))
        .route("/catalog/{media_type}/{id}", get(stream::catalog))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .with_state(state);

    Router::new()
        .merge(addon_routes)
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
