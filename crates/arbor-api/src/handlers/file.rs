//! File upload, metadata, download, and deletion handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use arbor_core::error::AppError;
use arbor_core::types::{FileId, FolderId};
use arbor_entity::file::File;
use arbor_service::{DeletionReport, UploadItem};

use crate::dto::request::ConfirmDeleteRequest;
use crate::dto::response::{ApiResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::{Owner, ValidatedJson};
use crate::handlers::parse_path_id;
use crate::state::AppState;

/// POST /api/files (multipart: optional `folder_id`, one or more `files`)
pub async fn upload_files(
    State(state): State<AppState>,
    owner: Owner,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut folder_id: Option<FolderId> = None;
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(
                        text.parse()
                            .map_err(|_| AppError::validation("Invalid folder_id"))?,
                    );
                }
            }
            "files" | "file" => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                items.push(UploadItem {
                    file_name,
                    content_type,
                    data: Some(data),
                });
            }
            _ => {}
        }
    }

    let report = state.upload_service.upload(&owner, folder_id, items).await?;
    Ok(Json(ApiResponse::ok(report.into())))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let id: FileId = parse_path_id(&id, "File")?;
    let file = state.file_service.get_file(&owner, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files/{id}/content
pub async fn download_file(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: FileId = parse_path_id(&id, "File")?;
    let (file, data) = state.file_service.download(&owner, id).await?;

    let content_type = file
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.name.replace(['"', '\\'], "_")
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// POST /api/files/{id}/delete
pub async fn delete_file(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
    ValidatedJson(_confirm): ValidatedJson<ConfirmDeleteRequest>,
) -> Result<Json<ApiResponse<DeletionReport>>, ApiError> {
    let id: FileId = parse_path_id(&id, "File")?;
    let report = state.cascade_service.delete_file(&owner, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}
