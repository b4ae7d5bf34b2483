//! Repository for the `import_jobs` table.
//!
//! The pipeline is strictly linear: pending -> parsing -> generating ->
//! judging -> enriching -> completed, with any stage error jumping to
//! failed. Every stage update is guarded against terminal states so a
//! job reclassified to `timeout` by the status poll cannot be
//! resurrected by a still-running driver.

use sqlx::PgPool;

use faqbase_core::status::ImportStatus;

use crate::models::import::{ImportJob, ImportListQuery};

/// Column list for `import_jobs` queries.
const COLUMNS: &str = "\
    id, import_id, filename, status_id, total_qa, passed_qa, error_msg, \
    started_at, created_at, updated_at";

/// Wall-clock budget after which a non-terminal job is reported as
/// timed out. The job never self-cancels; the next status poll
/// reclassifies it.
pub const IMPORT_TIMEOUT_SECS: i64 = 300;

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Terminal statuses: completed, failed, timeout.
const TERMINAL_STATUSES: [i16; 3] = [
    ImportStatus::Completed as i16,
    ImportStatus::Failed as i16,
    ImportStatus::Timeout as i16,
];

/// Provides stage-advancement operations for import jobs.
pub struct ImportRepo;

impl ImportRepo {
    /// Record a new pending job.
    pub async fn create(
        pool: &PgPool,
        import_id: &str,
        filename: &str,
    ) -> Result<ImportJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO import_jobs (import_id, filename, status_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(import_id)
            .bind(filename)
            .bind(ImportStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Find a job by its external import ID.
    pub async fn find_by_import_id(
        pool: &PgPool,
        import_id: &str,
    ) -> Result<Option<ImportJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM import_jobs WHERE import_id = $1");
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(import_id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &ImportListQuery,
    ) -> Result<Vec<ImportJob>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);
        let query = format!(
            "SELECT {COLUMNS} FROM import_jobs \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ImportJob>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Advance to a non-terminal stage, optionally updating the QA
    /// counters as they become known. Returns `false` if the job is
    /// already terminal (e.g. reclassified to timeout).
    pub async fn advance_stage(
        pool: &PgPool,
        import_id: &str,
        stage: ImportStatus,
        total_qa: Option<i32>,
        passed_qa: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE import_jobs \
             SET status_id = $2, \
                 total_qa = COALESCE($3, total_qa), \
                 passed_qa = COALESCE($4, passed_qa), \
                 updated_at = NOW() \
             WHERE import_id = $1 AND status_id NOT IN ($5, $6, $7)",
        )
        .bind(import_id)
        .bind(stage.id())
        .bind(total_qa)
        .bind(passed_qa)
        .bind(TERMINAL_STATUSES[0])
        .bind(TERMINAL_STATUSES[1])
        .bind(TERMINAL_STATUSES[2])
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the job completed with its final counters.
    pub async fn complete(
        pool: &PgPool,
        import_id: &str,
        total_qa: i32,
        passed_qa: i32,
    ) -> Result<bool, sqlx::Error> {
        Self::advance_stage(
            pool,
            import_id,
            ImportStatus::Completed,
            Some(total_qa),
            Some(passed_qa),
        )
        .await
    }

    /// Mark the job failed with an error message. Counters keep whatever
    /// value the last successful stage wrote.
    pub async fn fail(
        pool: &PgPool,
        import_id: &str,
        error_msg: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE import_jobs \
             SET status_id = $2, error_msg = $3, updated_at = NOW() \
             WHERE import_id = $1 AND status_id NOT IN ($4, $5, $6)",
        )
        .bind(import_id)
        .bind(ImportStatus::Failed.id())
        .bind(error_msg)
        .bind(TERMINAL_STATUSES[0])
        .bind(TERMINAL_STATUSES[1])
        .bind(TERMINAL_STATUSES[2])
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reclassify a non-terminal job as timed out when its wall-clock
    /// budget has elapsed. Called by the status poll, never by the job
    /// itself. Returns whether a reclassification happened.
    pub async fn reclassify_if_expired(
        pool: &PgPool,
        import_id: &str,
        budget_secs: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE import_jobs \
             SET status_id = $2, updated_at = NOW() \
             WHERE import_id = $1 \
               AND status_id NOT IN ($3, $4, $5) \
               AND started_at < NOW() - ($6 * INTERVAL '1 second')",
        )
        .bind(import_id)
        .bind(ImportStatus::Timeout.id())
        .bind(TERMINAL_STATUSES[0])
        .bind(TERMINAL_STATUSES[1])
        .bind(TERMINAL_STATUSES[2])
        .bind(budget_secs as f64)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
