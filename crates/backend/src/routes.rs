use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::state::AppState;

/// Configure all application routes
pub fn configure_routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // U501 DATASET LOAD
        // ========================================
        .route(
            "/api/u501/load/upload",
            post(handlers::u501_load_dataset::u501_upload)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/u501/load/start",
            post(handlers::u501_load_dataset::u501_start_load),
        )
        .route(
            "/api/u501/load/:load_id/progress",
            get(handlers::u501_load_dataset::u501_get_progress),
        )
        // ========================================
        // EXPLORER
        // ========================================
        .route("/api/explorer/catalog", get(handlers::explorer::get_catalog))
        .route("/api/explorer/config", get(handlers::explorer::get_config))
        .route(
            "/api/explorer/config/apply",
            post(handlers::explorer::apply_config),
        )
        .route(
            "/api/explorer/field-editor/:view",
            get(handlers::explorer::get_field_editor),
        )
        .route("/api/explorer/controls", get(handlers::explorer::get_controls))
        .route("/api/explorer/query", post(handlers::explorer::run_query))
        .route(
            "/api/explorer/records/:position",
            get(handlers::explorer::get_record),
        )
        .route(
            "/api/explorer/live/search",
            post(handlers::explorer::live_search),
        )
        .route(
            "/api/explorer/live/inputs",
            post(handlers::explorer::live_inputs),
        )
        .route("/api/explorer/live", get(handlers::explorer::get_live))
        .route("/api/explorer/export", get(handlers::explorer::export))
        .with_state(state)
}
