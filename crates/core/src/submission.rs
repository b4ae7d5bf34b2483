//! Submission validation constants and helpers.
//!
//! Applied at the API boundary before an item is created; the stored
//! `answer_raw` is immutable afterwards, so nothing downstream
//! re-validates.

use crate::error::CoreError;

/// Maximum length for a submitted question.
pub const MAX_QUESTION_LENGTH: usize = 2_000;

/// Maximum length for a raw submitted answer.
pub const MAX_ANSWER_RAW_LENGTH: usize = 50_000;

/// Maximum length for a version change reason.
pub const MAX_CHANGE_REASON_LENGTH: usize = 500;

/// Validate a question/raw-answer pair for item creation.
///
/// Both must be non-empty after trimming. Returns the trimmed values so
/// the caller persists exactly what was validated.
pub fn validate_submission<'a>(
    question: &'a str,
    answer_raw: &'a str,
) -> Result<(&'a str, &'a str), CoreError> {
    let question = question.trim();
    let answer_raw = answer_raw.trim();

    if question.is_empty() {
        return Err(CoreError::Validation("question must not be empty".into()));
    }
    if answer_raw.is_empty() {
        return Err(CoreError::Validation("answer must not be empty".into()));
    }
    if question.len() > MAX_QUESTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "question exceeds maximum length of {MAX_QUESTION_LENGTH} characters"
        )));
    }
    if answer_raw.len() > MAX_ANSWER_RAW_LENGTH {
        return Err(CoreError::Validation(format!(
            "answer exceeds maximum length of {MAX_ANSWER_RAW_LENGTH} characters"
        )));
    }

    Ok((question, answer_raw))
}

/// Validate an optional change reason attached to a publish action.
pub fn validate_change_reason(reason: &Option<String>) -> Result<(), CoreError> {
    if let Some(r) = reason {
        if r.len() > MAX_CHANGE_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "change reason exceeds maximum length of {MAX_CHANGE_REASON_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission_accepted() {
        let (q, a) = validate_submission("What is LoRA?", "Low-rank adaptation.").unwrap();
        assert_eq!(q, "What is LoRA?");
        assert_eq!(a, "Low-rank adaptation.");
    }

    #[test]
    fn test_submission_is_trimmed() {
        let (q, a) = validate_submission("  q  ", "\n a \n").unwrap();
        assert_eq!(q, "q");
        assert_eq!(a, "a");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert!(validate_submission("", "answer").is_err());
        assert!(validate_submission("   ", "answer").is_err());
    }

    #[test]
    fn test_empty_answer_rejected() {
        assert!(validate_submission("question", "").is_err());
        assert!(validate_submission("question", "  \n ").is_err());
    }

    #[test]
    fn test_overlong_question_rejected() {
        let q = "q".repeat(MAX_QUESTION_LENGTH + 1);
        let result = validate_submission(&q, "answer");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("maximum length"));
    }

    #[test]
    fn test_overlong_change_reason_rejected() {
        let reason = Some("r".repeat(MAX_CHANGE_REASON_LENGTH + 1));
        assert!(validate_change_reason(&reason).is_err());
        assert!(validate_change_reason(&Some("fixed a typo".into())).is_ok());
        assert!(validate_change_reason(&None).is_ok());
    }
}
