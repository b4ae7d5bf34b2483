/// Errors from the enrichment gateway.
///
/// Callers treat every variant the same way: the attempt failed and the
/// message is recorded on the item. The split exists for logging, not
/// for branching.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Enrichment API configuration is incomplete: {0}")]
    Config(String),

    #[error("Enrichment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Enrichment API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Enrichment returned an empty response")]
    EmptyResponse,

    #[error("Enrichment returned an invalid payload: {0}")]
    InvalidPayload(String),
}
