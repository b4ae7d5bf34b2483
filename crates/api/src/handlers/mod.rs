//! Request handlers, grouped by resource.

pub mod admin;
pub mod faq;
pub mod favorites;
pub mod health;
pub mod imports;
pub mod versions;
pub mod votes;

use faqbase_core::error::CoreError;
use faqbase_core::types::DbId;
use faqbase_db::repositories::FaqRepo;

use crate::error::{AppError, AppResult};

/// Return 404 unless a FAQ item with this id exists.
pub(crate) async fn ensure_faq_exists(pool: &sqlx::PgPool, faq_id: DbId) -> AppResult<()> {
    if FaqRepo::find_by_id(pool, faq_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "FaqItem",
            id: faq_id,
        }));
    }
    Ok(())
}
