//! Folder browsing, creation, move, and deletion handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use arbor_core::result::AppResult;
use arbor_core::types::FolderId;
use arbor_entity::folder::Folder;
use arbor_service::{DeletionReport, RequestContext};

use crate::dto::request::{ConfirmDeleteRequest, CreateFolderRequest, MoveFolderRequest};
use crate::dto::response::{ApiResponse, FolderView};
use crate::error::ApiError;
use crate::extractors::{Owner, ValidatedJson};
use crate::handlers::parse_path_id;
use crate::state::AppState;

/// GET /api/folders
pub async fn list_root(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<ApiResponse<FolderView>>, ApiError> {
    let view = folder_view(&state, &owner, None).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FolderView>>, ApiError> {
    let id: FolderId = parse_path_id(&id, "Folder")?;
    let view = folder_view(&state, &owner, Some(id)).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    owner: Owner,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let folder = state
        .folder_service
        .create_folder(&owner, &req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// POST /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let id: FolderId = parse_path_id(&id, "Folder")?;
    let folder = state
        .folder_service
        .move_folder(&owner, id, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/folders/{id}/delete
pub async fn delete_folder(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
    ValidatedJson(_confirm): ValidatedJson<ConfirmDeleteRequest>,
) -> Result<Json<ApiResponse<DeletionReport>>, ApiError> {
    let id: FolderId = parse_path_id(&id, "Folder")?;
    let report = state.cascade_service.delete_folder(&owner, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

async fn folder_view(
    state: &AppState,
    ctx: &RequestContext,
    folder_id: Option<FolderId>,
) -> AppResult<FolderView> {
    let folder = match folder_id {
        Some(id) => Some(state.folder_service.get_folder(ctx, id).await?),
        None => None,
    };
    let listing = state.folder_service.list_children(ctx, folder_id).await?;
    let breadcrumbs = state.breadcrumb_service.breadcrumbs(ctx, folder_id).await?;

    Ok(FolderView {
        folder,
        breadcrumbs,
        folders: listing.folders,
        files: listing.files,
    })
}
