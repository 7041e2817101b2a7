use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::usecases::u501_load_dataset::{LoadProgress, LoadRequest, LoadResponse};
use serde::Deserialize;

use crate::shared::state::AppState;
use crate::usecases::u501_load_dataset::{loader::BytesSource, LoadError};

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub collection: Option<String>,
}

fn status_for(e: &LoadError) -> StatusCode {
    match e {
        LoadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LoadError::MalformedInput(_)
        | LoadError::AmbiguousCollection(_)
        | LoadError::CollectionNotFound(_) => StatusCode::BAD_REQUEST,
    }
}

/// POST /api/u501/load/upload?collection=<name>
pub async fn u501_upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<LoadResponse>, StatusCode> {
    let source = BytesSource {
        bytes: body.to_vec(),
    };
    match state.loader.load_now(&source, query.collection).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Dataset upload failed: {}", e);
            Err(status_for(&e))
        }
    }
}

/// POST /api/u501/load/start
pub async fn u501_start_load(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Json<LoadResponse> {
    Json(state.loader.start_load(request))
}

/// GET /api/u501/load/:load_id/progress
pub async fn u501_get_progress(
    State(state): State<AppState>,
    Path(load_id): Path<String>,
) -> Result<Json<LoadProgress>, StatusCode> {
    match state.loader.get_progress(&load_id) {
        Some(progress) => Ok(Json(progress)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_for(&LoadError::MalformedInput("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&LoadError::AmbiguousCollection(vec!["a".to_string(), "b".to_string()])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&LoadError::Io(std::io::Error::from(std::io::ErrorKind::NotFound))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
