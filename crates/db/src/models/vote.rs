//! Vote ledger models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use faqbase_core::status::StatusId;
use faqbase_core::types::{DbId, Timestamp};

/// A row from the `faq_votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub faq_id: DbId,
    pub voter_key: String,
    pub vote_type_id: StatusId,
    pub reason: Option<String>,
    pub detail: Option<String>,
    #[serde(skip)]
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a cast attempt.
///
/// `{inserted: false, switched: false}` means the voter already holds a
/// vote of the same type -- surfaced to clients as a conflict, not an
/// error. `{inserted: true, switched: true}` means an existing vote of
/// the other type was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CastOutcome {
    pub inserted: bool,
    pub switched: bool,
}

/// Request body for `POST /api/v1/faq/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    /// `"upvote"` or `"downvote"`.
    pub r#type: String,
    /// Anonymous browser fingerprint; ignored when the caller is
    /// authenticated.
    pub fingerprint: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

/// Request body for `DELETE /api/v1/faq/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct RevokeVoteRequest {
    pub fingerprint: Option<String>,
}

/// Live aggregate counts for one item.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct VoteCounts {
    pub upvote_count: i32,
    pub downvote_count: i32,
}
