//! The gateway trait consumed by the orchestrator.

use async_trait::async_trait;

use crate::error::EnrichError;
use crate::types::{EnrichmentOutcome, GeneratedQa, JudgeReport};

/// Boundary to the external analysis service.
///
/// Implementations must be safe to call concurrently; the orchestrator
/// fires one call per in-flight item with no coordination between them.
/// Any error return is terminal for that attempt -- retry happens only
/// through an explicit lifecycle `retry`.
#[async_trait]
pub trait EnrichmentGateway: Send + Sync {
    /// Analyze one question/raw-answer pair into structured enrichment.
    ///
    /// `existing_tags` is the published tag vocabulary, passed so the
    /// service reuses established terms instead of inventing synonyms.
    async fn analyze(
        &self,
        question: &str,
        answer_raw: &str,
        existing_tags: &[String],
    ) -> Result<EnrichmentOutcome, EnrichError>;

    /// Generate candidate QA pairs from an imported document's text.
    async fn generate_qa_pairs(
        &self,
        document_text: &str,
        existing_tags: &[String],
    ) -> Result<Vec<GeneratedQa>, EnrichError>;

    /// Score candidate pairs against the document they came from.
    ///
    /// The report's `results` are index-aligned with `pairs`.
    async fn judge_qa_pairs(
        &self,
        pairs: &[GeneratedQa],
        document_summary: &str,
    ) -> Result<JudgeReport, EnrichError>;
}
