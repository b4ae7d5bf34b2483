//! Import batch driver.
//!
//! Funnels one uploaded document through generate -> judge -> enrich,
//! advancing the job's status at each stage. The pipeline is strictly
//! linear: any error jumps the job to `failed`. Each passed candidate
//! runs through the same per-item lifecycle sequence as a manual
//! submission, and one candidate's failure never affects its siblings.
//!
//! The job never watches its own clock. If the status poll reclassified
//! it to `timeout`, the next stage update is refused and the driver
//! stops quietly.

use uuid::Uuid;

use faqbase_core::status::ImportStatus;
use faqbase_db::models::faq::CreateFaqItem;
use faqbase_db::models::import::ImportJob;
use faqbase_db::repositories::{FaqRepo, ImportRepo};
use faqbase_enrich::JudgeVerdict;

use crate::error::PipelineError;
use crate::orchestrator::{process_item, Orchestrator};

impl Orchestrator {
    /// Record an import job and start driving it in the background.
    ///
    /// Returns once the job row exists in `pending`.
    pub async fn start_import(
        &self,
        filename: &str,
        content: String,
    ) -> Result<ImportJob, sqlx::Error> {
        let import_id = format!("imp_{}", Uuid::new_v4().simple());
        let job = ImportRepo::create(self.pool(), &import_id, filename).await?;
        tracing::info!(import_id = %job.import_id, filename, "Import job created");

        let orchestrator = self.clone();
        tokio::spawn(async move {
            run_import(&orchestrator, &import_id, &content).await;
        });

        Ok(job)
    }
}

/// Drive one import job to a terminal state.
///
/// Public so tests (and a future queue worker) can run the sequence to
/// completion without racing a detached task.
pub async fn run_import(orchestrator: &Orchestrator, import_id: &str, content: &str) {
    match drive(orchestrator, import_id, content).await {
        Ok(()) => {}
        Err(e) => {
            let message = e.to_string();
            tracing::warn!(import_id, error = %message, "Import job failed");
            if let Err(store_err) = ImportRepo::fail(orchestrator.pool(), import_id, &message).await
            {
                tracing::error!(
                    import_id,
                    error = %store_err,
                    "Failed to record import failure",
                );
            }
        }
    }
}

async fn drive(
    orchestrator: &Orchestrator,
    import_id: &str,
    content: &str,
) -> Result<(), PipelineError> {
    let pool = orchestrator.pool();

    if !ImportRepo::advance_stage(pool, import_id, ImportStatus::Parsing, None, None).await? {
        return Ok(()); // already terminal (reclassified); stop quietly
    }
    let text = content.trim();
    if text.is_empty() {
        return Err(PipelineError::Invalid("document content is empty".into()));
    }

    if !ImportRepo::advance_stage(pool, import_id, ImportStatus::Generating, None, None).await? {
        return Ok(());
    }
    let existing_tags = FaqRepo::published_tags(pool).await?;
    let pairs = orchestrator
        .gateway()
        .generate_qa_pairs(text, &existing_tags)
        .await?;

    if pairs.is_empty() {
        ImportRepo::complete(pool, import_id, 0, 0).await?;
        tracing::info!(import_id, "Import produced no candidates");
        return Ok(());
    }

    let total = pairs.len();
    if !ImportRepo::advance_stage(
        pool,
        import_id,
        ImportStatus::Judging,
        Some(total as i32),
        None,
    )
    .await?
    {
        return Ok(());
    }
    let report = orchestrator.gateway().judge_qa_pairs(&pairs, text).await?;

    let passed: Vec<_> = pairs
        .into_iter()
        .zip(report.results.iter())
        .filter(|(_, score)| score.verdict == JudgeVerdict::Pass)
        .map(|(qa, _)| qa)
        .collect();

    if !ImportRepo::advance_stage(
        pool,
        import_id,
        ImportStatus::Enriching,
        Some(total as i32),
        Some(passed.len() as i32),
    )
    .await?
    {
        return Ok(());
    }

    let passed_count = passed.len();
    for qa in passed {
        let input = CreateFaqItem {
            question: qa.question,
            answer_raw: qa.answer,
        };
        match FaqRepo::create(pool, &input).await {
            Ok(item) => {
                // Same per-item sequence as a manual submission, driven
                // inline; a failed candidate parks itself in `failed`
                // and the loop moves on.
                process_item(pool, orchestrator.gateway().as_ref(), item.id).await;
            }
            Err(e) => {
                tracing::warn!(
                    import_id,
                    question = %input.question,
                    error = %e,
                    "Failed to create item for import candidate",
                );
            }
        }
    }

    ImportRepo::complete(pool, import_id, total as i32, passed_count as i32).await?;
    tracing::info!(import_id, total, passed = passed_count, "Import job completed");
    Ok(())
}
