//! Integration tests for import job tracking.
//!
//! Exercises `ImportRepo` against a real database:
//! - Linear stage advancement with counter updates
//! - Failure jumps to terminal with an error message
//! - Terminal jobs refuse further stage updates
//! - Timeout reclassification by the external observer

use sqlx::PgPool;

use faqbase_core::status::ImportStatus;
use faqbase_db::models::import::ImportListQuery;
use faqbase_db::repositories::import_repo::IMPORT_TIMEOUT_SECS;
use faqbase_db::repositories::ImportRepo;

// ---------------------------------------------------------------------------
// Test: full happy path pending -> ... -> completed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_linear_happy_path(pool: PgPool) {
    let job = ImportRepo::create(&pool, "imp_happy", "notes.md").await.unwrap();
    assert_eq!(job.status_id, ImportStatus::Pending.id());
    assert_eq!(job.total_qa, 0);

    assert!(
        ImportRepo::advance_stage(&pool, "imp_happy", ImportStatus::Parsing, None, None)
            .await
            .unwrap()
    );
    assert!(
        ImportRepo::advance_stage(&pool, "imp_happy", ImportStatus::Generating, None, None)
            .await
            .unwrap()
    );
    assert!(
        ImportRepo::advance_stage(&pool, "imp_happy", ImportStatus::Judging, Some(10), None)
            .await
            .unwrap()
    );
    assert!(
        ImportRepo::advance_stage(&pool, "imp_happy", ImportStatus::Enriching, Some(10), Some(7))
            .await
            .unwrap()
    );
    assert!(ImportRepo::complete(&pool, "imp_happy", 10, 7).await.unwrap());

    let done = ImportRepo::find_by_import_id(&pool, "imp_happy")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status_id, ImportStatus::Completed.id());
    assert_eq!(done.total_qa, 10);
    assert_eq!(done.passed_qa, 7);
    assert_eq!(done.error_msg, None);
}

// ---------------------------------------------------------------------------
// Test: failure during judging is terminal and keeps counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failure_mid_pipeline(pool: PgPool) {
    ImportRepo::create(&pool, "imp_fail", "notes.md").await.unwrap();
    ImportRepo::advance_stage(&pool, "imp_fail", ImportStatus::Parsing, None, None)
        .await
        .unwrap();
    ImportRepo::advance_stage(&pool, "imp_fail", ImportStatus::Generating, None, None)
        .await
        .unwrap();
    ImportRepo::advance_stage(&pool, "imp_fail", ImportStatus::Judging, Some(10), None)
        .await
        .unwrap();

    assert!(ImportRepo::fail(&pool, "imp_fail", "judge returned malformed JSON")
        .await
        .unwrap());

    let job = ImportRepo::find_by_import_id(&pool, "imp_fail")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, ImportStatus::Failed.id());
    assert_eq!(job.error_msg.as_deref(), Some("judge returned malformed JSON"));
    assert_eq!(job.total_qa, 10, "counters from completed stages survive");
    assert_eq!(job.passed_qa, 0, "passed_qa was never reached");

    // No resurrection: later stage updates are refused.
    assert!(
        !ImportRepo::advance_stage(&pool, "imp_fail", ImportStatus::Enriching, None, Some(7))
            .await
            .unwrap()
    );
    assert!(!ImportRepo::complete(&pool, "imp_fail", 10, 7).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: timeout reclassification by the status poll
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_timeout_reclassification(pool: PgPool) {
    ImportRepo::create(&pool, "imp_slow", "big.pdf").await.unwrap();
    ImportRepo::advance_stage(&pool, "imp_slow", ImportStatus::Generating, None, None)
        .await
        .unwrap();

    // Not overdue yet: the poll leaves it alone.
    assert!(
        !ImportRepo::reclassify_if_expired(&pool, "imp_slow", IMPORT_TIMEOUT_SECS)
            .await
            .unwrap()
    );

    // Backdate the start past the budget.
    sqlx::query(
        "UPDATE import_jobs SET started_at = NOW() - INTERVAL '10 minutes' \
         WHERE import_id = $1",
    )
    .bind("imp_slow")
    .execute(&pool)
    .await
    .unwrap();

    assert!(
        ImportRepo::reclassify_if_expired(&pool, "imp_slow", IMPORT_TIMEOUT_SECS)
            .await
            .unwrap()
    );

    let job = ImportRepo::find_by_import_id(&pool, "imp_slow")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, ImportStatus::Timeout.id());

    // A late driver update cannot resurrect the job.
    assert!(!ImportRepo::complete(&pool, "imp_slow", 5, 5).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: completed jobs are never reclassified
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_never_reclassified(pool: PgPool) {
    ImportRepo::create(&pool, "imp_done", "notes.md").await.unwrap();
    ImportRepo::complete(&pool, "imp_done", 3, 3).await.unwrap();

    sqlx::query(
        "UPDATE import_jobs SET started_at = NOW() - INTERVAL '1 hour' \
         WHERE import_id = $1",
    )
    .bind("imp_done")
    .execute(&pool)
    .await
    .unwrap();

    assert!(
        !ImportRepo::reclassify_if_expired(&pool, "imp_done", IMPORT_TIMEOUT_SECS)
            .await
            .unwrap()
    );

    let job = ImportRepo::find_by_import_id(&pool, "imp_done")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, ImportStatus::Completed.id());
}

// ---------------------------------------------------------------------------
// Test: listing is newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing(pool: PgPool) {
    ImportRepo::create(&pool, "imp_a", "a.md").await.unwrap();
    ImportRepo::create(&pool, "imp_b", "b.md").await.unwrap();

    let jobs = ImportRepo::list(&pool, &ImportListQuery::default()).await.unwrap();
    assert_eq!(jobs.len(), 2);
    let ids: Vec<&str> = jobs.iter().map(|j| j.import_id.as_str()).collect();
    assert!(ids.contains(&"imp_a") && ids.contains(&"imp_b"));
}
