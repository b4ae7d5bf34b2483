//! Import job models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use faqbase_core::status::StatusId;
use faqbase_core::types::{DbId, Timestamp};

/// A row from the `import_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImportJob {
    pub id: DbId,
    pub import_id: String,
    pub filename: String,
    pub status_id: StatusId,
    pub total_qa: i32,
    pub passed_qa: i32,
    pub error_msg: Option<String>,
    pub started_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /api/v1/admin/faq/import`.
///
/// Carries already-extracted document text; file parsing/OCR happens
/// upstream of this service.
#[derive(Debug, Deserialize)]
pub struct CreateImportRequest {
    pub filename: String,
    pub content: String,
}

/// Query parameters for the import job listing.
#[derive(Debug, Default, Deserialize)]
pub struct ImportListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
