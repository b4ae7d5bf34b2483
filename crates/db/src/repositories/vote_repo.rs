//! Repository for the `faq_votes` ledger.
//!
//! One active vote per `(faq_id, voter_key)`, enforced by the
//! `uq_faq_votes_faq_voter` constraint. Casting the other type switches
//! the existing vote; casting the same type is a conflict outcome, not
//! an error. Aggregate counters live on the item row and are adjusted
//! only here, clamped at zero in SQL so no decrement race can drive
//! them negative.

use sqlx::{PgPool, Postgres, Transaction};

use faqbase_core::status::VoteType;
use faqbase_core::types::DbId;
use faqbase_core::vote::VoterKey;

use crate::models::vote::{CastOutcome, Vote, VoteCounts};

/// Column list for `faq_votes` queries.
const COLUMNS: &str = "\
    id, faq_id, voter_key, vote_type_id, reason, detail, ip_address, \
    created_at, updated_at";

/// Provides cast/revoke/listing operations for votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast a vote, switching an existing vote of the other type.
    ///
    /// Outcomes:
    /// - no existing vote: insert, bump the matching counter,
    ///   `{inserted: true, switched: false}`
    /// - existing vote of the same type: `{inserted: false, switched:
    ///   false}` (caller surfaces as "already voted")
    /// - existing vote of the other type: replace row, move one count
    ///   from the old counter to the new, `{inserted: true, switched:
    ///   true}`
    ///
    /// The row lock taken by the initial `SELECT ... FOR UPDATE` makes
    /// the check-insert-adjust sequence atomic per voter; the unique
    /// constraint is the backstop if two first-time casts race, with the
    /// loser retried as a switch/conflict.
    pub async fn cast(
        pool: &PgPool,
        faq_id: DbId,
        voter: &VoterKey,
        vote_type: VoteType,
        reason: Option<&str>,
        detail: Option<&str>,
        ip_address: Option<&str>,
    ) -> Result<CastOutcome, sqlx::Error> {
        let voter_key = voter.as_key();
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId, i16)> = sqlx::query_as(
            "SELECT id, vote_type_id FROM faq_votes \
             WHERE faq_id = $1 AND voter_key = $2 \
             FOR UPDATE",
        )
        .bind(faq_id)
        .bind(&voter_key)
        .fetch_optional(&mut *tx)
        .await?;

        let (existing_id, existing_type_id) = match existing {
            Some(row) => row,
            None => {
                let inserted: Option<(DbId,)> = sqlx::query_as(
                    "INSERT INTO faq_votes \
                         (faq_id, voter_key, vote_type_id, reason, detail, ip_address) \
                     VALUES ($1, $2, $3, $4, $5, $6) \
                     ON CONFLICT (faq_id, voter_key) DO NOTHING \
                     RETURNING id",
                )
                .bind(faq_id)
                .bind(&voter_key)
                .bind(vote_type.id())
                .bind(reason)
                .bind(detail)
                .bind(ip_address)
                .fetch_optional(&mut *tx)
                .await?;

                if inserted.is_some() {
                    increment_counter(&mut tx, faq_id, vote_type).await?;
                    tx.commit().await?;
                    return Ok(CastOutcome {
                        inserted: true,
                        switched: false,
                    });
                }

                // Lost the insert race to a concurrent first-time cast.
                // The winner's row is committed now; re-read it under
                // lock and fall through to the same-type/switch handling.
                sqlx::query_as(
                    "SELECT id, vote_type_id FROM faq_votes \
                     WHERE faq_id = $1 AND voter_key = $2 \
                     FOR UPDATE",
                )
                .bind(faq_id)
                .bind(&voter_key)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let outcome = if existing_type_id == vote_type.id() {
            CastOutcome {
                inserted: false,
                switched: false,
            }
        } else {
            sqlx::query("DELETE FROM faq_votes WHERE id = $1")
                .bind(existing_id)
                .execute(&mut *tx)
                .await?;
            if let Some(old_type) = VoteType::from_id(existing_type_id) {
                decrement_counter(&mut tx, faq_id, old_type).await?;
            }

            sqlx::query(
                "INSERT INTO faq_votes \
                     (faq_id, voter_key, vote_type_id, reason, detail, ip_address) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(faq_id)
            .bind(&voter_key)
            .bind(vote_type.id())
            .bind(reason)
            .bind(detail)
            .bind(ip_address)
            .execute(&mut *tx)
            .await?;
            increment_counter(&mut tx, faq_id, vote_type).await?;

            CastOutcome {
                inserted: true,
                switched: true,
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Remove the voter's active vote, if any, and decrement its
    /// counter. Returns whether anything was removed.
    pub async fn revoke(
        pool: &PgPool,
        faq_id: DbId,
        voter: &VoterKey,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed: Option<(i16,)> = sqlx::query_as(
            "DELETE FROM faq_votes WHERE faq_id = $1 AND voter_key = $2 \
             RETURNING vote_type_id",
        )
        .bind(faq_id)
        .bind(voter.as_key())
        .fetch_optional(&mut *tx)
        .await?;

        let removed = match removed {
            Some((type_id,)) => {
                if let Some(vote_type) = VoteType::from_id(type_id) {
                    decrement_counter(&mut tx, faq_id, vote_type).await?;
                }
                true
            }
            None => false,
        };

        tx.commit().await?;
        Ok(removed)
    }

    /// List a voter's active votes across all items, newest first. Used
    /// to rebuild the client-side vote cache from authoritative state.
    pub async fn list_by_voter(pool: &PgPool, voter: &VoterKey) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_votes WHERE voter_key = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(voter.as_key())
            .fetch_all(pool)
            .await
    }

    /// Find the voter's active vote on one item.
    pub async fn find_for_item(
        pool: &PgPool,
        faq_id: DbId,
        voter: &VoterKey,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faq_votes WHERE faq_id = $1 AND voter_key = $2"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(faq_id)
            .bind(voter.as_key())
            .fetch_optional(pool)
            .await
    }

    /// Live aggregate counts for one item, read off the item row.
    pub async fn counts_for(pool: &PgPool, faq_id: DbId) -> Result<VoteCounts, sqlx::Error> {
        sqlx::query_as::<_, VoteCounts>(
            "SELECT upvote_count, downvote_count FROM faq_items WHERE id = $1",
        )
        .bind(faq_id)
        .fetch_one(pool)
        .await
    }
}

/// Bump the aggregate counter matching `vote_type` by one.
///
/// Dispatch is a match on the closed enum; there is no string-built
/// column name anywhere in the vote path.
async fn increment_counter(
    tx: &mut Transaction<'_, Postgres>,
    faq_id: DbId,
    vote_type: VoteType,
) -> Result<(), sqlx::Error> {
    let query = match vote_type {
        VoteType::Upvote => {
            "UPDATE faq_items SET upvote_count = upvote_count + 1, updated_at = NOW() \
             WHERE id = $1"
        }
        VoteType::Downvote => {
            "UPDATE faq_items SET downvote_count = downvote_count + 1, updated_at = NOW() \
             WHERE id = $1"
        }
    };
    sqlx::query(query).bind(faq_id).execute(&mut **tx).await?;
    Ok(())
}

/// Drop the aggregate counter matching `vote_type` by one, clamped at
/// zero in SQL.
async fn decrement_counter(
    tx: &mut Transaction<'_, Postgres>,
    faq_id: DbId,
    vote_type: VoteType,
) -> Result<(), sqlx::Error> {
    let query = match vote_type {
        VoteType::Upvote => {
            "UPDATE faq_items SET upvote_count = GREATEST(upvote_count - 1, 0), \
                 updated_at = NOW() \
             WHERE id = $1"
        }
        VoteType::Downvote => {
            "UPDATE faq_items SET downvote_count = GREATEST(downvote_count - 1, 0), \
                 updated_at = NOW() \
             WHERE id = $1"
        }
    };
    sqlx::query(query).bind(faq_id).execute(&mut **tx).await?;
    Ok(())
}
