//! Enrichment gateway: the boundary to the external analysis service.
//!
//! The rest of the system sees only the [`EnrichmentGateway`] trait and
//! its typed payloads; every upstream failure mode (timeout, malformed
//! JSON, quota) surfaces uniformly as [`EnrichError`], which the
//! orchestrator flattens into the item's `failed` state.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::{EnrichConfig, HttpEnrichmentClient};
pub use error::EnrichError;
pub use gateway::EnrichmentGateway;
pub use types::{
    EnrichmentOutcome, GeneratedQa, JudgeReport, JudgeScore, JudgeVerdict, JUDGE_PASS_THRESHOLD,
};
