//! Favorite handlers (authenticated users only).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use faqbase_core::types::DbId;
use faqbase_db::repositories::FavoriteRepo;

use crate::error::AppResult;
use crate::handlers::ensure_faq_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/faq/{id}/favorite
///
/// Toggle the caller's favorite for this item. Returns the resulting
/// state.
pub async fn toggle_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_faq_exists(&state.pool, faq_id).await?;

    let favorited = FavoriteRepo::toggle(&state.pool, auth.user_id, faq_id).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "favorited": favorited }),
    }))
}

/// GET /api/v1/user/favorites
///
/// List the caller's favorited item IDs, newest first.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: favorites }))
}
