//! Repository for the `faq_versions` archive.
//!
//! Strictly append-only: rows are inserted at publish time and never
//! updated or deleted. (The publish transaction in `FaqRepo` performs
//! its own insert inline; the `insert` here serves migration tooling
//! and tests.)

use sqlx::PgPool;

use faqbase_core::types::DbId;

use crate::models::version::{VersionSnapshot, VersionWithVotes};
use crate::models::vote::VoteCounts;

/// Column list for `faq_versions` queries.
const COLUMNS: &str = "\
    id, faq_id, version_number, answer, answer_brief, answer_en, \
    answer_brief_en, change_reason, created_at";

/// Provides append and listing operations for version snapshots.
pub struct VersionRepo;

impl VersionRepo {
    /// Append a snapshot of replaced content.
    pub async fn insert(
        pool: &PgPool,
        faq_id: DbId,
        version_number: i32,
        answer: &str,
        answer_brief: Option<&str>,
        answer_en: Option<&str>,
        answer_brief_en: Option<&str>,
        change_reason: Option<&str>,
    ) -> Result<VersionSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO faq_versions \
                 (faq_id, version_number, answer, answer_brief, answer_en, \
                  answer_brief_en, change_reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(faq_id)
            .bind(version_number)
            .bind(answer)
            .bind(answer_brief)
            .bind(answer_en)
            .bind(answer_brief_en)
            .bind(change_reason)
            .fetch_one(pool)
            .await
    }

    /// List all snapshots for an item, newest version first.
    pub async fn list_by_faq(
        pool: &PgPool,
        faq_id: DbId,
    ) -> Result<Vec<VersionSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_versions WHERE faq_id = $1 \
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(faq_id)
            .fetch_all(pool)
            .await
    }

    /// Find one snapshot by item and version number.
    pub async fn find_by_version(
        pool: &PgPool,
        faq_id: DbId,
        version_number: i32,
    ) -> Result<Option<VersionSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_versions \
             WHERE faq_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(faq_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// List snapshots with the item's live vote counts attached.
    ///
    /// The counts are read at listing time from the item row, not frozen
    /// per snapshot; votes stay attached to the live item.
    pub async fn list_with_votes(
        pool: &PgPool,
        faq_id: DbId,
    ) -> Result<Vec<VersionWithVotes>, sqlx::Error> {
        let votes: VoteCounts = sqlx::query_as(
            "SELECT upvote_count, downvote_count FROM faq_items WHERE id = $1",
        )
        .bind(faq_id)
        .fetch_one(pool)
        .await?;

        let snapshots = Self::list_by_faq(pool, faq_id).await?;
        Ok(snapshots
            .into_iter()
            .map(|snapshot| VersionWithVotes { snapshot, votes })
            .collect())
    }
}
