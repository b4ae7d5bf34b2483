//! Repository for the `faq_items` table.
//!
//! Every status change is a compare-and-swap: `UPDATE ... WHERE id = $1
//! AND status_id = <expected>`. Zero rows affected means another writer
//! got there first (or the caller's view was stale); the caller decides
//! whether that is an error (admin action) or a no-op (duplicate async
//! completion). Legality of a transition is decided beforehand by
//! `faqbase_core::lifecycle::next_status`; this layer only enforces the
//! "from the state I expected" half.

use sqlx::types::Json;
use sqlx::PgPool;

use faqbase_core::status::FaqStatus;
use faqbase_core::types::DbId;

use crate::models::faq::{CreateFaqItem, EnrichmentUpdate, FaqItem, FaqListQuery, UpdateFaqItem};

/// Column list for `faq_items` queries.
const COLUMNS: &str = "\
    id, status_id, question, question_en, answer_raw, answer, answer_brief, \
    answer_en, answer_brief_en, tags, categories, \"references\", images, \
    current_version, published_answer, published_answer_brief, \
    published_answer_en, published_answer_brief_en, published_at, \
    upvote_count, downvote_count, error_message, reviewed_at, reviewed_by, \
    last_updated_at, created_at, updated_at";

/// Maximum page size for item listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for item listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides lifecycle-aware CRUD operations for FAQ items.
pub struct FaqRepo;

impl FaqRepo {
    /// Create a new item in `pending` status with no enriched answer.
    pub async fn create(pool: &PgPool, input: &CreateFaqItem) -> Result<FaqItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO faq_items (question, answer_raw, status_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(&input.question)
            .bind(&input.answer_raw)
            .bind(FaqStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaqItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faq_items WHERE id = $1");
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read just the current status of an item.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<FaqStatus>, sqlx::Error> {
        let row: Option<(i16,)> = sqlx::query_as("SELECT status_id FROM faq_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.and_then(|(status_id,)| FaqStatus::from_id(status_id)))
    }

    /// List items across all statuses (admin view) with optional status
    /// filter and pagination, newest first.
    pub async fn list_all(
        pool: &PgPool,
        params: &FaqListQuery,
    ) -> Result<Vec<FaqItem>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build the WHERE clause and track the next bind parameter index.
        let mut bind_idx: u32 = 1;
        let where_clause = if params.status_id.is_some() {
            bind_idx += 1;
            "WHERE status_id = $1".to_string()
        } else {
            String::new()
        };

        let query = format!(
            "SELECT {COLUMNS} FROM faq_items \
             {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, FaqItem>(&query);
        if let Some(status_id) = params.status_id {
            q = q.bind(status_id);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// List published items, newest first (the public browse surface).
    pub async fn list_published(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<FaqItem>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);
        let query = format!(
            "SELECT {COLUMNS} FROM faq_items WHERE status_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(FaqStatus::Published.id())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Distinct tags across published items, for enrichment vocabulary
    /// reuse. Alphabetical for stability.
    pub async fn published_tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT unnest(tags) FROM faq_items WHERE status_id = $1 ORDER BY 1",
        )
        .bind(FaqStatus::Published.id())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    // ── Lifecycle transitions (all compare-and-swap) ─────────────────

    /// `pending -> processing`: the enrichment call is being dispatched.
    /// Clears any stale error message. Returns `false` if the item was
    /// not in `pending`.
    pub async fn mark_processing(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items \
             SET status_id = $2, error_message = NULL, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(id)
        .bind(FaqStatus::Processing.id())
        .bind(FaqStatus::Pending.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `processing -> review`: apply the enrichment payload.
    ///
    /// Returns `false` when the item is no longer in `processing`; a
    /// duplicate completion from a stale in-flight attempt must treat
    /// that as a no-op, never an error.
    pub async fn complete_enrichment(
        pool: &PgPool,
        id: DbId,
        update: &EnrichmentUpdate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items \
             SET status_id = $2, answer = $3, answer_brief = $4, \
                 question_en = $5, answer_en = $6, answer_brief_en = $7, \
                 tags = $8, categories = $9, \"references\" = $10, images = $11, \
                 error_message = NULL, last_updated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status_id = $12",
        )
        .bind(id)
        .bind(FaqStatus::Review.id())
        .bind(&update.answer)
        .bind(&update.answer_brief)
        .bind(&update.question_en)
        .bind(&update.answer_en)
        .bind(&update.answer_brief_en)
        .bind(&update.tags)
        .bind(&update.categories)
        .bind(Json(&update.references))
        .bind(Json(&update.images))
        .bind(FaqStatus::Processing.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `processing -> failed`: record the enrichment error. Returns
    /// `false` when the item is no longer in `processing` (stale
    /// completion; a no-op).
    pub async fn fail_enrichment(
        pool: &PgPool,
        id: DbId,
        error_message: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items \
             SET status_id = $2, error_message = $3, updated_at = NOW() \
             WHERE id = $1 AND status_id = $4",
        )
        .bind(id)
        .bind(FaqStatus::Failed.id())
        .bind(error_message)
        .bind(FaqStatus::Processing.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `failed | rejected -> pending`: reset for a fresh enrichment
    /// attempt. Clears the error message so the failed ⇔ error-message
    /// invariant holds.
    pub async fn reset_for_retry(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items \
             SET status_id = $2, error_message = NULL, updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($3, $4)",
        )
        .bind(id)
        .bind(FaqStatus::Pending.id())
        .bind(FaqStatus::Failed.id())
        .bind(FaqStatus::Rejected.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `review -> published`, archiving replaced content when needed.
    ///
    /// Within one transaction:
    /// 1. CAS the status from `review` to `published` (the serialization
    ///    point; a concurrent publish/reject loses here).
    /// 2. If the item has been published before and the answer differs
    ///    from the currently-published content, append a snapshot of the
    ///    replaced content under the current version number and bump
    ///    `current_version`.
    /// 3. Copy the answer fields into the `published_*` columns and stamp
    ///    the review metadata.
    ///
    /// The first publish never snapshots; republishing identical content
    /// never snapshots and leaves the version untouched.
    ///
    /// Returns `None` if the CAS found the item absent or not in
    /// `review`.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        change_reason: Option<&str>,
    ) -> Result<Option<FaqItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cas = sqlx::query(
            "UPDATE faq_items SET status_id = $2 WHERE id = $1 AND status_id = $3",
        )
        .bind(id)
        .bind(FaqStatus::Published.id())
        .bind(FaqStatus::Review.id())
        .execute(&mut *tx)
        .await?;
        if cas.rows_affected() == 0 {
            return Ok(None);
        }

        // The CAS row lock serializes everything below against other
        // writers of this item.
        let query = format!("SELECT {COLUMNS} FROM faq_items WHERE id = $1");
        let item = sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let replaced = item.published_at.is_some()
            && item
                .published_answer
                .as_deref()
                .is_some_and(|prev| item.answer.as_deref() != Some(prev));

        if replaced {
            sqlx::query(
                "INSERT INTO faq_versions \
                     (faq_id, version_number, answer, answer_brief, answer_en, \
                      answer_brief_en, change_reason) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(id)
            .bind(item.current_version)
            .bind(&item.published_answer)
            .bind(&item.published_answer_brief)
            .bind(&item.published_answer_en)
            .bind(&item.published_answer_brief_en)
            .bind(change_reason)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE faq_items SET current_version = current_version + 1 WHERE id = $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE faq_items \
             SET published_answer = answer, \
                 published_answer_brief = answer_brief, \
                 published_answer_en = answer_en, \
                 published_answer_brief_en = answer_brief_en, \
                 published_at = COALESCE(published_at, NOW()), \
                 reviewed_at = NOW(), reviewed_by = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let published = sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .bind(reviewer_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(published))
    }

    /// `review -> rejected`. Returns `false` if the item was not in
    /// `review`.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items \
             SET status_id = $2, reviewed_at = NOW(), reviewed_by = $3, updated_at = NOW() \
             WHERE id = $1 AND status_id = $4",
        )
        .bind(id)
        .bind(FaqStatus::Rejected.id())
        .bind(reviewer_id)
        .bind(FaqStatus::Review.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `published -> review` (unpublish). No version side effect: the
    /// `published_*` columns keep the last published content so a later
    /// re-publish can still tell whether anything changed.
    pub async fn unpublish(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faq_items SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(id)
        .bind(FaqStatus::Review.id())
        .bind(FaqStatus::Published.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Manual edits ─────────────────────────────────────────────────

    /// Apply an admin field patch. Only non-`None` fields are written;
    /// the status is never touched here (status moves exclusively
    /// through the lifecycle transitions above).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn manual_edit(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaqItem,
    ) -> Result<Option<FaqItem>, sqlx::Error> {
        let query = format!(
            "UPDATE faq_items SET \
                question = COALESCE($2, question), \
                question_en = COALESCE($3, question_en), \
                answer = COALESCE($4, answer), \
                answer_brief = COALESCE($5, answer_brief), \
                answer_en = COALESCE($6, answer_en), \
                answer_brief_en = COALESCE($7, answer_brief_en), \
                tags = COALESCE($8, tags), \
                categories = COALESCE($9, categories), \
                \"references\" = COALESCE($10, \"references\"), \
                images = COALESCE($11, images), \
                last_updated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaqItem>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.question_en)
            .bind(&input.answer)
            .bind(&input.answer_brief)
            .bind(&input.answer_en)
            .bind(&input.answer_brief_en)
            .bind(&input.tags)
            .bind(&input.categories)
            .bind(input.references.as_ref().map(Json))
            .bind(input.images.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }
}
