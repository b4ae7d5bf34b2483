//! Public vote handlers.
//!
//! Authenticated callers vote under their user id; anonymous callers
//! supply a browser fingerprint. Re-casting the same type returns 409 --
//! an expected outcome surfaced to the client as "already voted", not a
//! logged failure.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use faqbase_core::error::CoreError;
use faqbase_core::status::VoteType;
use faqbase_core::types::DbId;
use faqbase_core::vote::VoterKey;
use faqbase_db::models::vote::{CastVoteRequest, RevokeVoteRequest};
use faqbase_db::repositories::VoteRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_faq_exists;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve the ledger identity for this call: user id when
/// authenticated, fingerprint otherwise.
fn resolve_voter(auth: &MaybeAuthUser, fingerprint: Option<&str>) -> AppResult<VoterKey> {
    match &auth.0 {
        Some(user) => Ok(VoterKey::User(user.user_id)),
        None => {
            let fp = fingerprint.ok_or_else(|| {
                AppError::Core(CoreError::Validation("fingerprint is required".into()))
            })?;
            VoterKey::anonymous(fp).map_err(AppError::Core)
        }
    }
}

/// Best-effort client address from proxy headers.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        })
}

/// POST /api/v1/faq/{id}/vote
///
/// Cast or switch a vote. Returns 409 when the caller already holds a
/// vote of the same type.
pub async fn cast_vote(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CastVoteRequest>,
) -> AppResult<impl IntoResponse> {
    let vote_type = VoteType::parse(&input.r#type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "type must be one of: upvote, downvote".into(),
        ))
    })?;
    let voter = resolve_voter(&auth, input.fingerprint.as_deref())?;

    ensure_faq_exists(&state.pool, faq_id).await?;

    let ip = client_ip(&headers);
    let outcome = VoteRepo::cast(
        &state.pool,
        faq_id,
        &voter,
        vote_type,
        input.reason.as_deref(),
        input.detail.as_deref(),
        ip.as_deref(),
    )
    .await?;

    if !outcome.inserted {
        return Err(AppError::Core(CoreError::Conflict("Already voted".into())));
    }

    tracing::info!(
        faq_id,
        vote_type = %vote_type,
        switched = outcome.switched,
        "Vote cast",
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// DELETE /api/v1/faq/{id}/vote
///
/// Revoke the caller's active vote. `removed: false` means there was
/// nothing to remove -- not an error.
pub async fn revoke_vote(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
    Json(input): Json<RevokeVoteRequest>,
) -> AppResult<impl IntoResponse> {
    let voter = resolve_voter(&auth, input.fingerprint.as_deref())?;
    ensure_faq_exists(&state.pool, faq_id).await?;

    let removed = VoteRepo::revoke(&state.pool, faq_id, &voter).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "removed": removed }),
    }))
}

/// Query parameters for the vote listing.
#[derive(Debug, Deserialize)]
pub struct VoteListQuery {
    pub fingerprint: Option<String>,
}

/// GET /api/v1/faq/votes
///
/// List the caller's active votes across items, so clients can rebuild
/// their local vote cache from authoritative state.
pub async fn list_votes(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<VoteListQuery>,
) -> AppResult<impl IntoResponse> {
    let voter = resolve_voter(&auth, params.fingerprint.as_deref())?;
    let votes = VoteRepo::list_by_voter(&state.pool, &voter).await?;
    Ok((StatusCode::OK, Json(DataResponse { data: votes })))
}
