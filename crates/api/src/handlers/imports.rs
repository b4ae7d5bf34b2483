//! Import job handlers (admin only).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use faqbase_core::error::CoreError;
use faqbase_db::models::import::{CreateImportRequest, ImportListQuery};
use faqbase_db::repositories::import_repo::IMPORT_TIMEOUT_SECS;
use faqbase_db::repositories::ImportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/faq/import
///
/// Start an import from already-extracted document text. Returns 202
/// with the pending job; the batch runs as detached background work.
pub async fn create_import(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateImportRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    if input.filename.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "filename must not be empty".into(),
        )));
    }

    let job = state
        .orchestrator
        .start_import(input.filename.trim(), input.content)
        .await?;

    tracing::info!(
        import_id = %job.import_id,
        user_id = auth.user_id,
        "Import started",
    );

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}

/// GET /api/v1/admin/faq/import/{import_id}
///
/// Poll an import job. The poll is where the wall-clock budget is
/// enforced: an overdue non-terminal job is reclassified to `timeout`
/// before being returned.
pub async fn get_import(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(import_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let reclassified =
        ImportRepo::reclassify_if_expired(&state.pool, &import_id, IMPORT_TIMEOUT_SECS).await?;
    if reclassified {
        tracing::warn!(import_id = %import_id, "Import job reclassified as timed out");
    }

    let job = ImportRepo::find_by_import_id(&state.pool, &import_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Import job {import_id} not found")))?;

    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/admin/faq/import
///
/// List import jobs, newest first.
pub async fn list_imports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ImportListQuery>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let jobs = ImportRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}
