//! The FAQ item lifecycle transition table.
//!
//! Every status change in the system -- whether triggered by the
//! orchestrator's async completions or by an admin action -- must consult
//! [`next_status`] before touching storage. The same item can be reached
//! concurrently from both paths, so legality lives here, in one table,
//! rather than in per-endpoint checks. The persistence layer then applies
//! the change with a compare-and-swap on the current status so that of two
//! racing transitions from the same starting state only one can win.
//!
//! `Retry` deliberately lands on `Pending` rather than `Processing`: a
//! retry always restarts the full async sequence, so an orchestrator that
//! crashed mid-flight can never leave an item permanently stuck.

use crate::error::CoreError;
use crate::status::FaqStatus;

/// An event that may move an item between lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqEvent {
    /// The orchestrator dispatched the enrichment call.
    EnrichmentStarted,
    /// The enrichment call returned a usable payload.
    EnrichmentSucceeded,
    /// The enrichment call failed (timeout, malformed response, quota).
    EnrichmentFailed,
    /// An admin accepted the item for publication.
    Publish,
    /// An admin turned the item down.
    Reject,
    /// An admin pulled a published item back into review.
    Unpublish,
    /// An admin requested a fresh enrichment attempt.
    Retry,
}

impl FaqEvent {
    /// Stable lowercase name, used in errors and log fields.
    pub fn name(self) -> &'static str {
        match self {
            FaqEvent::EnrichmentStarted => "enrichment_started",
            FaqEvent::EnrichmentSucceeded => "enrichment_succeeded",
            FaqEvent::EnrichmentFailed => "enrichment_failed",
            FaqEvent::Publish => "publish",
            FaqEvent::Reject => "reject",
            FaqEvent::Unpublish => "unpublish",
            FaqEvent::Retry => "retry",
        }
    }
}

impl std::fmt::Display for FaqEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the target status for `event` fired from `from`.
///
/// Returns [`CoreError::InvalidTransition`] for any pair not in the
/// table; callers must not mutate state in that case.
pub fn next_status(from: FaqStatus, event: FaqEvent) -> Result<FaqStatus, CoreError> {
    use FaqEvent::*;
    use FaqStatus::*;

    let to = match (from, event) {
        (Pending, EnrichmentStarted) => Processing,
        (Processing, EnrichmentSucceeded) => Review,
        (Processing, EnrichmentFailed) => Failed,
        (Failed, Retry) | (Rejected, Retry) => Pending,
        (Review, Publish) => Published,
        (Review, Reject) => Rejected,
        (Published, Unpublish) => Review,
        _ => return Err(CoreError::InvalidTransition { from, event }),
    };
    Ok(to)
}

/// Whether a completion event (`EnrichmentSucceeded`/`EnrichmentFailed`)
/// arriving while the item is in `from` should be silently dropped.
///
/// Duplicate completions are expected: a retry may have already moved the
/// item out of `Processing` before a stale in-flight attempt resolves.
/// Those must be no-ops, not errors.
pub fn completion_is_stale(from: FaqStatus, event: FaqEvent) -> bool {
    matches!(
        event,
        FaqEvent::EnrichmentSucceeded | FaqEvent::EnrichmentFailed
    ) && from != FaqStatus::Processing
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_STATUSES: [FaqStatus; 6] = [
        FaqStatus::Pending,
        FaqStatus::Processing,
        FaqStatus::Review,
        FaqStatus::Published,
        FaqStatus::Rejected,
        FaqStatus::Failed,
    ];

    const ALL_EVENTS: [FaqEvent; 7] = [
        FaqEvent::EnrichmentStarted,
        FaqEvent::EnrichmentSucceeded,
        FaqEvent::EnrichmentFailed,
        FaqEvent::Publish,
        FaqEvent::Reject,
        FaqEvent::Unpublish,
        FaqEvent::Retry,
    ];

    #[test]
    fn legal_transitions_resolve() {
        assert_eq!(
            next_status(FaqStatus::Pending, FaqEvent::EnrichmentStarted).unwrap(),
            FaqStatus::Processing
        );
        assert_eq!(
            next_status(FaqStatus::Processing, FaqEvent::EnrichmentSucceeded).unwrap(),
            FaqStatus::Review
        );
        assert_eq!(
            next_status(FaqStatus::Processing, FaqEvent::EnrichmentFailed).unwrap(),
            FaqStatus::Failed
        );
        assert_eq!(
            next_status(FaqStatus::Review, FaqEvent::Publish).unwrap(),
            FaqStatus::Published
        );
        assert_eq!(
            next_status(FaqStatus::Review, FaqEvent::Reject).unwrap(),
            FaqStatus::Rejected
        );
        assert_eq!(
            next_status(FaqStatus::Published, FaqEvent::Unpublish).unwrap(),
            FaqStatus::Review
        );
    }

    #[test]
    fn retry_always_funnels_through_pending() {
        assert_eq!(
            next_status(FaqStatus::Failed, FaqEvent::Retry).unwrap(),
            FaqStatus::Pending
        );
        assert_eq!(
            next_status(FaqStatus::Rejected, FaqEvent::Retry).unwrap(),
            FaqStatus::Pending
        );
        // Retry never jumps straight back into Processing.
        for from in [FaqStatus::Failed, FaqStatus::Rejected] {
            assert_ne!(
                next_status(from, FaqEvent::Retry).unwrap(),
                FaqStatus::Processing
            );
        }
    }

    #[test]
    fn retry_is_illegal_from_non_retryable_states() {
        for from in [
            FaqStatus::Pending,
            FaqStatus::Processing,
            FaqStatus::Review,
            FaqStatus::Published,
        ] {
            assert_matches!(
                next_status(from, FaqEvent::Retry),
                Err(CoreError::InvalidTransition { .. })
            );
        }
    }

    #[test]
    fn publish_is_only_legal_from_review() {
        for from in ALL_STATUSES {
            let result = next_status(from, FaqEvent::Publish);
            if from == FaqStatus::Review {
                assert_eq!(result.unwrap(), FaqStatus::Published);
            } else {
                assert_matches!(result, Err(CoreError::InvalidTransition { .. }));
            }
        }
    }

    #[test]
    fn enrichment_never_lands_straight_on_published() {
        // A successful enrichment always parks the item in Review; only an
        // explicit admin publish may promote it.
        for from in ALL_STATUSES {
            if let Ok(to) = next_status(from, FaqEvent::EnrichmentSucceeded) {
                assert_eq!(to, FaqStatus::Review);
            }
        }
    }

    #[test]
    fn every_unlisted_pair_is_rejected_and_names_the_pair() {
        let err = next_status(FaqStatus::Published, FaqEvent::Publish).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("publish"), "error should name the event: {msg}");
        assert!(
            msg.contains("published"),
            "error should name the from-status: {msg}"
        );
    }

    #[test]
    fn transition_table_is_total() {
        // Every (status, event) pair either resolves or returns
        // InvalidTransition; nothing panics.
        for from in ALL_STATUSES {
            for event in ALL_EVENTS {
                let _ = next_status(from, event);
            }
        }
    }

    #[test]
    fn stale_completion_detection() {
        // Completions are stale anywhere except Processing.
        for from in ALL_STATUSES {
            let stale = completion_is_stale(from, FaqEvent::EnrichmentSucceeded);
            assert_eq!(stale, from != FaqStatus::Processing, "from={from}");
        }
        // Non-completion events are never classified as stale.
        assert!(!completion_is_stale(FaqStatus::Published, FaqEvent::Publish));
        assert!(!completion_is_stale(FaqStatus::Failed, FaqEvent::Retry));
    }
}
