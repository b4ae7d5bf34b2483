//! Admin handlers: submission, listing, the lifecycle action dispatch,
//! and manual edits. All endpoints require the admin role.
//!
//! Every action routes through the central transition table in
//! `faqbase_core::lifecycle` before any storage write, and the write
//! itself is a compare-and-swap -- so an action that races the
//! orchestrator (or another admin) on the same item fails cleanly
//! instead of corrupting state.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use faqbase_core::error::CoreError;
use faqbase_core::lifecycle::{next_status, FaqEvent};
use faqbase_core::submission::{validate_change_reason, validate_submission};
use faqbase_core::tags::dedup_preserving_order;
use faqbase_core::types::DbId;
use faqbase_db::models::faq::{CreateFaqItem, FaqListQuery, UpdateFaqItem};
use faqbase_db::repositories::FaqRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/faq
///
/// Submit a new question/answer pair. Returns 201 with the item in
/// `pending`; enrichment runs as detached background work.
pub async fn submit_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFaqItem>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let (question, answer_raw) = validate_submission(&input.question, &input.answer_raw)?;
    let create = CreateFaqItem {
        question: question.to_string(),
        answer_raw: answer_raw.to_string(),
    };

    let item = state.orchestrator.submit(&create).await?;

    tracing::info!(faq_id = item.id, user_id = auth.user_id, "FAQ item submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/faq
///
/// List items across all statuses with optional `status_id` filter and
/// pagination.
pub async fn list_items(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FaqListQuery>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let items = FaqRepo::list_all(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/faq/{id}
///
/// Get a single item regardless of status.
pub async fn get_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let item = FaqRepo::find_by_id(&state.pool, faq_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Lifecycle actions
// ---------------------------------------------------------------------------

/// Request body for the action dispatch endpoint.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// One of `publish`, `reject`, `unpublish`, `retry`.
    pub action: String,
    /// Optional reason recorded on the version snapshot a publish may
    /// produce.
    pub change_reason: Option<String>,
}

fn parse_action(action: &str) -> Option<FaqEvent> {
    match action {
        "publish" => Some(FaqEvent::Publish),
        "reject" => Some(FaqEvent::Reject),
        "unpublish" => Some(FaqEvent::Unpublish),
        "retry" => Some(FaqEvent::Retry),
        _ => None,
    }
}

/// POST /api/v1/admin/faq/{id}/actions
///
/// Dispatch a lifecycle action. Illegal transitions return 409 with the
/// offending (status, action) pair; a legal action that loses a race to
/// a concurrent transition also returns 409, with state untouched.
pub async fn dispatch_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
    Json(input): Json<ActionRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let event = parse_action(&input.action).ok_or_else(|| {
        AppError::BadRequest("action must be one of: publish, reject, unpublish, retry".into())
    })?;
    validate_change_reason(&input.change_reason)?;

    let current = FaqRepo::find_status(&state.pool, faq_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }))?;

    // Central legality check; the storage compare-and-swap below
    // re-checks the starting state under concurrency.
    next_status(current, event)?;

    let applied = match event {
        FaqEvent::Publish => FaqRepo::publish(
            &state.pool,
            faq_id,
            auth.user_id,
            input.change_reason.as_deref(),
        )
        .await?
        .is_some(),
        FaqEvent::Reject => FaqRepo::reject(&state.pool, faq_id, auth.user_id).await?,
        FaqEvent::Unpublish => FaqRepo::unpublish(&state.pool, faq_id).await?,
        FaqEvent::Retry => state.orchestrator.retry(faq_id).await?,
        _ => unreachable!("parse_action only yields admin events"),
    };

    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Item state changed concurrently; action not applied".into(),
        )));
    }

    tracing::info!(
        faq_id,
        user_id = auth.user_id,
        action = %event,
        "Lifecycle action applied",
    );

    let item = FaqRepo::find_by_id(&state.pool, faq_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Manual edit
// ---------------------------------------------------------------------------

/// PATCH /api/v1/admin/faq/{id}
///
/// Apply a partial field update. The payload cannot carry a status --
/// status moves only through the actions endpoint -- and an edit never
/// bumps the version on its own; versioning happens at publish time.
pub async fn edit_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(faq_id): Path<DbId>,
    Json(mut input): Json<UpdateFaqItem>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    if let Some(question) = &input.question {
        if question.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "question must not be empty".into(),
            )));
        }
    }
    if let Some(answer) = &input.answer {
        if answer.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "answer must not be empty".into(),
            )));
        }
    }
    input.tags = input.tags.map(dedup_preserving_order);
    input.categories = input.categories.map(dedup_preserving_order);

    let item = FaqRepo::manual_edit(&state.pool, faq_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }))?;

    tracing::info!(faq_id, user_id = auth.user_id, "FAQ item edited");

    Ok(Json(DataResponse { data: item }))
}
