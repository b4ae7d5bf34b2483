use faqbase_enrich::EnrichError;

/// Errors inside a background pipeline run.
///
/// These never reach API callers: enrichment runs detached, and the
/// import driver converts any of them into the job's `failed` state.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Enrich(#[from] EnrichError),

    #[error("{0}")]
    Invalid(String),
}
