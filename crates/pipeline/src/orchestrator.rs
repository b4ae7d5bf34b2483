//! Drives `create -> enrichmentStarted -> (await gateway) ->
//! enrichmentSucceeded | enrichmentFailed` as detached background work.
//!
//! `submit` and `retry` return as soon as the item is persisted in
//! `pending`; the enrichment sequence runs on a spawned task whose
//! completion re-enters the lifecycle through the idempotent
//! compare-and-swap handlers in `FaqRepo`. A gateway failure is terminal
//! for that attempt -- there is no automatic re-retry, only the explicit
//! lifecycle `retry`. There is also no cancellation of in-flight calls:
//! a stale attempt that resolves after a retry simply finds the item no
//! longer in `processing` and becomes a no-op.

use std::sync::Arc;

use sqlx::PgPool;

use faqbase_core::tags::dedup_preserving_order;
use faqbase_core::types::DbId;
use faqbase_db::models::faq::{CreateFaqItem, EnrichmentUpdate, FaqItem};
use faqbase_db::repositories::FaqRepo;
use faqbase_enrich::{EnrichmentGateway, EnrichmentOutcome};

/// Sequences asynchronous enrichment around the item lifecycle.
#[derive(Clone)]
pub struct Orchestrator {
    pool: PgPool,
    gateway: Arc<dyn EnrichmentGateway>,
}

impl Orchestrator {
    pub fn new(pool: PgPool, gateway: Arc<dyn EnrichmentGateway>) -> Self {
        Self { pool, gateway }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn gateway(&self) -> &Arc<dyn EnrichmentGateway> {
        &self.gateway
    }

    /// Create an item and kick off enrichment in the background.
    ///
    /// Returns once the item exists in `pending`; the caller never waits
    /// on the gateway.
    pub async fn submit(&self, input: &CreateFaqItem) -> Result<FaqItem, sqlx::Error> {
        let item = FaqRepo::create(&self.pool, input).await?;
        tracing::info!(faq_id = item.id, "FAQ item submitted");
        self.spawn_enrichment(item.id);
        Ok(item)
    }

    /// Re-run enrichment for a `failed` or `rejected` item.
    ///
    /// Resets the item to `pending` (compare-and-swap; returns `false`
    /// when the item is in any other state) and re-enters the same
    /// sequence using the stored `answer_raw`, not the possibly-edited
    /// `answer`.
    pub async fn retry(&self, faq_id: DbId) -> Result<bool, sqlx::Error> {
        let reset = FaqRepo::reset_for_retry(&self.pool, faq_id).await?;
        if reset {
            tracing::info!(faq_id, "FAQ item reset for retry");
            self.spawn_enrichment(faq_id);
        }
        Ok(reset)
    }

    fn spawn_enrichment(&self, faq_id: DbId) {
        let pool = self.pool.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            process_item(&pool, gateway.as_ref(), faq_id).await;
        });
    }
}

/// Run one enrichment attempt for `faq_id`.
///
/// Never returns an error: every failure mode is absorbed into lifecycle
/// state (or logged, for storage errors where no state can be written).
/// Safe to call concurrently with itself for the same item -- the
/// `pending -> processing` compare-and-swap admits exactly one attempt.
pub async fn process_item(pool: &PgPool, gateway: &dyn EnrichmentGateway, faq_id: DbId) {
    let item = match FaqRepo::find_by_id(pool, faq_id).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            tracing::warn!(faq_id, "Enrichment requested for missing item");
            return;
        }
        Err(e) => {
            tracing::error!(faq_id, error = %e, "Failed to load item for enrichment");
            return;
        }
    };

    match FaqRepo::mark_processing(pool, faq_id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(faq_id, "Item no longer pending; skipping enrichment attempt");
            return;
        }
        Err(e) => {
            tracing::error!(faq_id, error = %e, "Failed to mark item processing");
            return;
        }
    }

    // Published tag vocabulary, for term reuse. A failure here degrades
    // to an empty vocabulary rather than failing the attempt.
    let existing_tags = match FaqRepo::published_tags(pool).await {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(faq_id, error = %e, "Failed to load tag vocabulary");
            Vec::new()
        }
    };

    match gateway
        .analyze(&item.question, &item.answer_raw, &existing_tags)
        .await
    {
        Ok(outcome) => {
            let update = enrichment_update(outcome);
            match FaqRepo::complete_enrichment(pool, faq_id, &update).await {
                Ok(true) => {
                    tracing::info!(faq_id, "Enrichment succeeded; item in review");
                }
                Ok(false) => {
                    tracing::debug!(faq_id, "Stale enrichment completion ignored");
                }
                Err(e) => {
                    tracing::error!(faq_id, error = %e, "Failed to store enrichment result");
                }
            }
        }
        Err(e) => {
            let message = e.to_string();
            match FaqRepo::fail_enrichment(pool, faq_id, &message).await {
                Ok(true) => {
                    tracing::warn!(faq_id, error = %message, "Enrichment failed");
                }
                Ok(false) => {
                    tracing::debug!(faq_id, "Stale enrichment failure ignored");
                }
                Err(store_err) => {
                    tracing::error!(
                        faq_id,
                        error = %store_err,
                        "Failed to record enrichment failure",
                    );
                }
            }
        }
    }
}

/// Normalize a gateway outcome into the persistence payload.
fn enrichment_update(outcome: EnrichmentOutcome) -> EnrichmentUpdate {
    EnrichmentUpdate {
        answer: outcome.answer,
        answer_brief: outcome.answer_brief,
        question_en: outcome.question_en,
        answer_en: outcome.answer_en,
        answer_brief_en: outcome.answer_brief_en,
        tags: dedup_preserving_order(outcome.tags),
        categories: dedup_preserving_order(outcome.categories),
        references: outcome.references,
        images: outcome.images,
    }
}
