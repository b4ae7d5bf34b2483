//! FAQ item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use faqbase_core::reference::{FaqImage, Reference};
use faqbase_core::status::StatusId;
use faqbase_core::types::{DbId, Timestamp};

/// A row from the `faq_items` table.
///
/// `answer_raw` is the immutable original submission. The `published_*`
/// columns mirror the content of the current published revision and are
/// written only inside the publish transaction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaqItem {
    pub id: DbId,
    pub status_id: StatusId,
    pub question: String,
    pub question_en: Option<String>,
    pub answer_raw: String,
    pub answer: Option<String>,
    pub answer_brief: Option<String>,
    pub answer_en: Option<String>,
    pub answer_brief_en: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub references: Json<Vec<Reference>>,
    pub images: Json<Vec<FaqImage>>,
    pub current_version: i32,
    #[serde(skip)]
    pub published_answer: Option<String>,
    #[serde(skip)]
    pub published_answer_brief: Option<String>,
    #[serde(skip)]
    pub published_answer_en: Option<String>,
    #[serde(skip)]
    pub published_answer_brief_en: Option<String>,
    pub published_at: Option<Timestamp>,
    pub upvote_count: i32,
    pub downvote_count: i32,
    pub error_message: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub last_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item. Validated at the API boundary via
/// `faqbase_core::submission::validate_submission`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqItem {
    pub question: String,
    pub answer_raw: String,
}

/// Enrichment payload applied on the `processing -> review` transition.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentUpdate {
    pub answer: String,
    pub answer_brief: Option<String>,
    pub question_en: Option<String>,
    pub answer_en: Option<String>,
    pub answer_brief_en: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub references: Vec<Reference>,
    pub images: Vec<FaqImage>,
}

/// DTO for admin manual edits.
///
/// Only provided fields are applied. There is deliberately no `status`
/// field here: status moves exclusively through the named lifecycle
/// actions, so a payload carrying one is rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFaqItem {
    pub question: Option<String>,
    pub question_en: Option<String>,
    pub answer: Option<String>,
    pub answer_brief: Option<String>,
    pub answer_en: Option<String>,
    pub answer_brief_en: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub references: Option<Vec<Reference>>,
    pub images: Option<Vec<FaqImage>>,
}

impl UpdateFaqItem {
    /// Whether the patch carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.question_en.is_none()
            && self.answer.is_none()
            && self.answer_brief.is_none()
            && self.answer_en.is_none()
            && self.answer_brief_en.is_none()
            && self.tags.is_none()
            && self.categories.is_none()
            && self.references.is_none()
            && self.images.is_none()
    }
}

/// Query parameters for the admin listing.
#[derive(Debug, Default, Deserialize)]
pub struct FaqListQuery {
    /// Filter by status ID (e.g. 3 = review, 4 = published).
    pub status_id: Option<StatusId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
