//! Favorite models.

use serde::Serialize;
use sqlx::FromRow;

use faqbase_core::types::{DbId, Timestamp};

/// A row from the `faq_favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub faq_id: DbId,
    pub created_at: Timestamp,
}
