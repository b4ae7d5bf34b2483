//! Public browse handlers. Only published items are visible here; the
//! admin surface in [`super::admin`] sees every status.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use faqbase_core::error::CoreError;
use faqbase_core::status::FaqStatus;
use faqbase_core::types::DbId;
use faqbase_db::repositories::FaqRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct PublicListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/faq
///
/// List published items, newest first.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PublicListQuery>,
) -> AppResult<impl IntoResponse> {
    let items = FaqRepo::list_published(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/faq/{id}
///
/// Get a single published item. Unpublished items are indistinguishable
/// from missing ones for public callers.
pub async fn get_published(
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = FaqRepo::find_by_id(&state.pool, faq_id)
        .await?
        .filter(|item| item.status_id == FaqStatus::Published.id())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }))?;

    Ok(Json(DataResponse { data: item }))
}
