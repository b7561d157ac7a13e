use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;

use crate::error::{AppError, Result};
use crate::services::ItemService;
use crate::AppState;

/// Serve an image by its stored name
/// GET /images/:filename
pub async fn download_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let path = ItemService::get_image_path(state.items.as_ref(), &state.store, &filename).await?;
    let data = read_stored_file(&path).await?;

    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// Download an item's attachment under its original name
/// GET /attach/:item_id
pub async fn download_attach(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<Response> {
    let (attach, path) =
        ItemService::get_attachment(state.items.as_ref(), &state.store, item_id).await?;
    let data = read_stored_file(&path).await?;

    tracing::info!("Downloading attachment {:?} of item {}", attach.original_name, item_id);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, data.len())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&attach.original_name),
        )
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// `attachment` disposition with the name percent-encoded as UTF-8, which
/// keeps non-ASCII names intact and quotes or line breaks out of the header.
fn content_disposition(original_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        urlencoding::encode(original_name)
    )
}

async fn read_stored_file(path: &std::path::Path) -> Result<Bytes> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound("File not found".to_string())
        } else {
            AppError::Io(e)
        }
    })?;

    Ok(Bytes::from(data))
}
