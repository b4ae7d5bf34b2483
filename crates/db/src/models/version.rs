//! Version snapshot models.

use serde::Serialize;
use sqlx::FromRow;

use faqbase_core::types::{DbId, Timestamp};

use super::vote::VoteCounts;

/// A row from the `faq_versions` table. Immutable once created.
///
/// `version_number` is the version this snapshot replaces, i.e. the
/// number the item held before the publish that displaced this content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionSnapshot {
    pub id: DbId,
    pub faq_id: DbId,
    pub version_number: i32,
    pub answer: String,
    pub answer_brief: Option<String>,
    pub answer_en: Option<String>,
    pub answer_brief_en: Option<String>,
    pub change_reason: Option<String>,
    pub created_at: Timestamp,
}

/// A snapshot joined with the item's live vote counts at listing time.
///
/// Votes belong to the live item, not to frozen revisions; attaching
/// them here is a display convenience only.
#[derive(Debug, Clone, Serialize)]
pub struct VersionWithVotes {
    #[serde(flatten)]
    pub snapshot: VersionSnapshot,
    pub votes: VoteCounts,
}
