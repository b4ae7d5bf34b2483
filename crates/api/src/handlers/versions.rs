//! Version history handlers, gated to premium or admin callers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use faqbase_core::error::CoreError;
use faqbase_core::types::DbId;
use faqbase_db::repositories::VersionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_faq_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn require_version_access(auth: &AuthUser) -> AppResult<()> {
    if !auth.can_view_versions() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Premium subscription required".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/faq/{id}/versions
///
/// List archived revisions for an item, newest first, each carrying the
/// item's live vote counts.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_version_access(&auth)?;
    ensure_faq_exists(&state.pool, faq_id).await?;

    let versions = VersionRepo::list_with_votes(&state.pool, faq_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /api/v1/faq/{id}/versions/{version}
///
/// Fetch one archived revision.
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((faq_id, version)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    require_version_access(&auth)?;
    ensure_faq_exists(&state.pool, faq_id).await?;

    let snapshot = VersionRepo::find_by_version(&state.pool, faq_id, version)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VersionSnapshot",
            id: version as i64,
        }))?;

    Ok(Json(DataResponse { data: snapshot }))
}
