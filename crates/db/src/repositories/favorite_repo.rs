//! Repository for the `faq_favorites` table.

use sqlx::PgPool;

use faqbase_core::types::DbId;

/// Provides favorite toggling and listing.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Toggle a favorite: insert if absent, remove if present. Returns
    /// whether the item is favorited after the call.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        faq_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let removed = sqlx::query(
            "DELETE FROM faq_favorites WHERE user_id = $1 AND faq_id = $2",
        )
        .bind(user_id)
        .bind(faq_id)
        .execute(pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO faq_favorites (user_id, faq_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, faq_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(faq_id)
        .execute(pool)
        .await?;
        Ok(true)
    }

    /// List the item IDs a user has favorited, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT faq_id FROM faq_favorites WHERE user_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
