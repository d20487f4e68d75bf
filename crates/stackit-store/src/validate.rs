//! Submission validation

use stackit_domain::NewQuestion;
use thiserror::Error;

/// Reasons a submission is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace
    #[error("title must not be empty")]
    EmptyTitle,

    /// Description is empty or whitespace
    #[error("description must not be empty")]
    EmptyDescription,

    /// No tag selected
    #[error("select at least one tag")]
    NoTags,

    /// Answer text is empty or whitespace
    #[error("answer must not be empty")]
    EmptyAnswer,
}

/// Check a question submission, reporting the first missing field
pub(crate) fn validate_question(submission: &NewQuestion) -> Result<(), ValidationError> {
    if submission.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if submission.description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if submission.tags.is_empty() {
        return Err(ValidationError::NoTags);
    }
    Ok(())
}

/// Check answer text and return it trimmed
pub(crate) fn validate_answer(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAnswer);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackit_domain::Tag;

    #[test]
    fn test_missing_fields_in_order() {
        let empty = NewQuestion::default();
        assert_eq!(validate_question(&empty), Err(ValidationError::EmptyTitle));

        let no_description = NewQuestion::new("Q", "   ", vec![Tag::Dp]);
        assert_eq!(validate_question(&no_description), Err(ValidationError::EmptyDescription));

        let no_tags = NewQuestion::new("Q", "d", vec![]);
        assert_eq!(validate_question(&no_tags), Err(ValidationError::NoTags));
    }

    #[test]
    fn test_complete_submission_passes() {
        let ok = NewQuestion::new("Q", "d", vec![Tag::Trie]);
        assert!(validate_question(&ok).is_ok());
    }

    #[test]
    fn test_answer_whitespace_rejected() {
        assert_eq!(validate_answer(" \t\n"), Err(ValidationError::EmptyAnswer));
        assert_eq!(validate_answer("  yes "), Ok("yes"));
    }
}
