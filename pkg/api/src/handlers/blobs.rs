use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use pkg_types::azure::{BlobDeleteResponse, BlobListResponse, BlobUploadResponse, ErrorResponse};

use crate::AppState;

/// POST /azure/blobs/:name — store the plain-text body, replacing any existing blob.
///
/// `size` counts UTF-16 code units, so a character outside the Basic
/// Multilingual Plane counts twice.
pub async fn upload_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let content = match std::str::from_utf8(&body) {
        Ok(content) => content,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::for_blob(
                    &name,
                    format!("Request body is not valid UTF-8: {}", e),
                )),
            )
                .into_response();
        }
    };

    match state.blobs.upload(&name, content).await {
        Ok(()) => (
            StatusCode::OK,
            Json(BlobUploadResponse {
                blob_name: name,
                size: content.encode_utf16().count().to_string(),
                message: "Blob uploaded successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::for_blob(&name, e.to_string())),
        )
            .into_response(),
    }
}

/// GET /azure/blobs/:name — blob content as plain text.
pub async fn download_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.blobs.download(&name).await {
        Ok(content) => (StatusCode::OK, content).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, format!("Blob not found: {}", e)).into_response(),
    }
}

/// HEAD /azure/blobs/:name — 200 if the blob exists, 404 otherwise.
pub async fn blob_exists(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    if state.blobs.exists(&name).await {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// GET /azure/blobs — every blob name in the container.
pub async fn list_blobs(State(state): State<AppState>) -> impl IntoResponse {
    match state.blobs.list().await {
        Ok(blobs) => (
            StatusCode::OK,
            Json(BlobListResponse {
                container_name: state.blobs.container_name().to_string(),
                count: blobs.len(),
                blobs,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

/// DELETE /azure/blobs/:name
pub async fn delete_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.blobs.delete(&name).await {
        Ok(()) => (
            StatusCode::OK,
            Json(BlobDeleteResponse {
                blob_name: name,
                message: "Blob deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::for_blob(&name, e.to_string())),
        )
            .into_response(),
    }
}
