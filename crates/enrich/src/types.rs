//! Typed payloads exchanged with the analysis service.

use serde::{Deserialize, Serialize};

use faqbase_core::reference::{FaqImage, Reference};

use crate::error::EnrichError;

/// Minimum average score for a generated QA pair to pass judging.
pub const JUDGE_PASS_THRESHOLD: f64 = 3.5;

/// Structured result of analyzing one question/answer pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentOutcome {
    /// Polished answer in Markdown. Required; an outcome without one is
    /// rejected before it reaches the lifecycle.
    pub answer: String,
    #[serde(default)]
    pub answer_brief: Option<String>,
    #[serde(default)]
    pub question_en: Option<String>,
    #[serde(default)]
    pub answer_en: Option<String>,
    #[serde(default)]
    pub answer_brief_en: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub images: Vec<FaqImage>,
}

impl EnrichmentOutcome {
    /// Enforce the "payload has answer" guard on the
    /// `enrichmentSucceeded` transition.
    pub fn validate(self) -> Result<Self, EnrichError> {
        if self.answer.trim().is_empty() {
            return Err(EnrichError::InvalidPayload(
                "analysis result is missing an answer".into(),
            ));
        }
        Ok(self)
    }
}

/// One candidate QA pair generated from an imported document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedQa {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
}

/// Pass/fail verdict for one judged QA pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeVerdict {
    Pass,
    Fail,
}

/// Per-dimension question scores (1-5).
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionScores {
    pub naturalness: f64,
    pub context_relevance: f64,
    pub knowledge_clarity: f64,
    pub phrasing: f64,
}

/// Per-dimension answer scores (1-5).
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerScores {
    pub accuracy: f64,
    pub completeness: f64,
    pub mastery: f64,
    pub independence: f64,
}

/// Judgment for one candidate pair.
#[derive(Debug, Clone, Deserialize)]
pub struct JudgeScore {
    pub question_scores: QuestionScores,
    pub answer_scores: AnswerScores,
    pub average: f64,
    pub verdict: JudgeVerdict,
    #[serde(default)]
    pub question_suggestion: Option<String>,
    #[serde(default)]
    pub answer_suggestion: Option<String>,
}

/// Totals attached to a judge report.
#[derive(Debug, Clone, Deserialize)]
pub struct JudgeSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Full judging result over a batch of candidates, index-aligned with
/// the input list.
#[derive(Debug, Clone, Deserialize)]
pub struct JudgeReport {
    pub results: Vec<JudgeScore>,
    pub summary: JudgeSummary,
}
