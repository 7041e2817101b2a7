use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::shared::explorer::{
    ApplyConfigRequest, ControlsResponse, DetailView, ExplorerConfig, ExportPayload,
    FieldCatalogDto, FieldEditorItem, LiveInputsRequest, LiveSearchRequest, LiveSnapshot,
    QueryRequest, QueryResponse, ViewKind,
};

use crate::shared::explorer::{query_engine, view_selection, ExplorerError, QueryError};
use crate::shared::state::AppState;

fn status_for(e: &ExplorerError) -> StatusCode {
    match e {
        ExplorerError::NoDataset => StatusCode::CONFLICT,
        ExplorerError::Query(QueryError::InvalidSortChoice(_)) => StatusCode::BAD_REQUEST,
        ExplorerError::Query(QueryError::RecordNotFound(_)) => StatusCode::NOT_FOUND,
    }
}

fn reject(action: &str, e: ExplorerError) -> StatusCode {
    let status = status_for(&e);
    if status == StatusCode::CONFLICT {
        tracing::debug!("{}: {}", action, e);
    } else {
        tracing::warn!("{}: {}", action, e);
    }
    status
}

/// GET /api/explorer/catalog
pub async fn get_catalog(
    State(state): State<AppState>,
) -> Result<Json<FieldCatalogDto>, StatusCode> {
    match state.store.current().await {
        Ok(session) => Ok(Json(session.catalog.to_dto())),
        Err(e) => Err(reject("Catalog unavailable", e)),
    }
}

/// GET /api/explorer/config
pub async fn get_config(State(state): State<AppState>) -> Result<Json<ExplorerConfig>, StatusCode> {
    match state.store.current().await {
        Ok(session) => Ok(Json(session.config())),
        Err(e) => Err(reject("Config unavailable", e)),
    }
}

/// POST /api/explorer/config/apply
pub async fn apply_config(
    State(state): State<AppState>,
    Json(request): Json<ApplyConfigRequest>,
) -> Result<Json<ExplorerConfig>, StatusCode> {
    match state.store.apply_config(&request).await {
        Ok(config) => Ok(Json(config)),
        Err(e) => Err(reject("Failed to apply config", e)),
    }
}

/// GET /api/explorer/field-editor/:view
pub async fn get_field_editor(
    State(state): State<AppState>,
    Path(view): Path<ViewKind>,
) -> Result<Json<Vec<FieldEditorItem>>, StatusCode> {
    let session = state
        .store
        .current()
        .await
        .map_err(|e| reject("Field editor unavailable", e))?;

    let selected = match view {
        ViewKind::List => &session.selection.list_fields,
        ViewKind::Detail => &session.selection.detail_fields,
    };
    Ok(Json(view_selection::editor_order(selected, &session.catalog)))
}

/// GET /api/explorer/controls
pub async fn get_controls(
    State(state): State<AppState>,
) -> Result<Json<ControlsResponse>, StatusCode> {
    let session = state
        .store
        .current()
        .await
        .map_err(|e| reject("Controls unavailable", e))?;

    Ok(Json(ControlsResponse {
        filters: query_engine::filter_controls(&session.context()),
        sort_options: query_engine::sort_options(&session.mapping, &session.catalog),
    }))
}

/// POST /api/explorer/query
pub async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, StatusCode> {
    let session = state
        .store
        .current()
        .await
        .map_err(|e| reject("Query rejected", e))?;

    match session.query(&request) {
        Ok(response) => Ok(Json(response)),
        Err(e) => Err(reject("Query rejected", e.into())),
    }
}

/// GET /api/explorer/records/:position
pub async fn get_record(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> Result<Json<DetailView>, StatusCode> {
    let session = state
        .store
        .current()
        .await
        .map_err(|e| reject("Record unavailable", e))?;

    match query_engine::detail_view(&session.context(), position) {
        Ok(view) => Ok(Json(view)),
        Err(e) => Err(reject("Record unavailable", e.into())),
    }
}

/// POST /api/explorer/live/search
///
/// Accepted at once; the live query re-runs after the quiet period.
pub async fn live_search(
    State(state): State<AppState>,
    Json(request): Json<LiveSearchRequest>,
) -> Result<StatusCode, StatusCode> {
    if let Err(e) = state.store.current().await {
        return Err(reject("Live search rejected", e));
    }
    state.store.schedule_live_search(request.text);
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/explorer/live/inputs
pub async fn live_inputs(
    State(state): State<AppState>,
    Json(request): Json<LiveInputsRequest>,
) -> Result<Json<LiveSnapshot>, StatusCode> {
    match state.store.set_live_inputs(request).await {
        Ok(Some(snapshot)) => Ok(Json(snapshot)),
        Ok(None) => Err(StatusCode::CONFLICT),
        Err(e) => Err(reject("Live inputs rejected", e)),
    }
}

/// GET /api/explorer/live
pub async fn get_live(State(state): State<AppState>) -> Result<Json<LiveSnapshot>, StatusCode> {
    match state.store.live_snapshot().await {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(StatusCode::CONFLICT),
    }
}

/// GET /api/explorer/export
pub async fn export(State(state): State<AppState>) -> Result<Json<ExportPayload>, StatusCode> {
    match state.store.current().await {
        Ok(session) => Ok(Json(session.export())),
        Err(e) => Err(reject("Export unavailable", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(status_for(&ExplorerError::NoDataset), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&QueryError::InvalidSortChoice("x".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&QueryError::RecordNotFound(7).into()),
            StatusCode::NOT_FOUND
        );
    }
}
