//! Voter identity.
//!
//! Authenticated users vote under their stable user id; anonymous
//! visitors vote under a client-generated browser fingerprint. Both are
//! flattened into a single string key so the ledger can enforce one
//! active vote per `(faq_id, voter_key)` with a single unique constraint.
//! Fingerprints are best-effort identity: they may collide or be reset,
//! and the ledger makes no fairness guarantee against that.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum accepted fingerprint length (hex digest plus headroom).
pub const MAX_FINGERPRINT_LENGTH: usize = 64;

/// Identity under which a vote is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterKey {
    /// An authenticated user, keyed by internal user id.
    User(DbId),
    /// An anonymous visitor, keyed by a client-side fingerprint.
    Anonymous(String),
}

impl VoterKey {
    /// Build an anonymous key, validating the fingerprint.
    pub fn anonymous(fingerprint: &str) -> Result<Self, CoreError> {
        let fp = fingerprint.trim();
        if fp.is_empty() {
            return Err(CoreError::Validation("fingerprint is required".into()));
        }
        if fp.len() > MAX_FINGERPRINT_LENGTH {
            return Err(CoreError::Validation(format!(
                "fingerprint exceeds maximum length of {MAX_FINGERPRINT_LENGTH} characters"
            )));
        }
        Ok(VoterKey::Anonymous(fp.to_string()))
    }

    /// The stable string form stored in the ledger's `voter_key` column.
    pub fn as_key(&self) -> String {
        match self {
            VoterKey::User(id) => format!("user:{id}"),
            VoterKey::Anonymous(fp) => format!("anon:{fp}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_anonymous_keys_never_collide() {
        let user = VoterKey::User(7);
        let anon = VoterKey::anonymous("7").unwrap();
        assert_ne!(user.as_key(), anon.as_key());
    }

    #[test]
    fn key_form_is_stable() {
        assert_eq!(VoterKey::User(42).as_key(), "user:42");
        assert_eq!(
            VoterKey::anonymous("abc123").unwrap().as_key(),
            "anon:abc123"
        );
    }

    #[test]
    fn empty_fingerprint_rejected() {
        assert!(VoterKey::anonymous("").is_err());
        assert!(VoterKey::anonymous("   ").is_err());
    }

    #[test]
    fn overlong_fingerprint_rejected() {
        let fp = "f".repeat(MAX_FINGERPRINT_LENGTH + 1);
        assert!(VoterKey::anonymous(&fp).is_err());
    }

    #[test]
    fn fingerprint_is_trimmed() {
        let key = VoterKey::anonymous("  abc  ").unwrap();
        assert_eq!(key.as_key(), "anon:abc");
    }
}
