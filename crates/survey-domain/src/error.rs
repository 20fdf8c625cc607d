//! Error types for domain construction
//!
//! Raised when a question definition from the catalog violates a
//! structural invariant. Fetch and orchestration errors live in the
//! engine crate.

/// Domain construction errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Choice question with no options
    #[error("choice question {0} has no options")]
    EmptyOptions(String),

    /// Scale with min >= max
    #[error("scale question {question} has invalid range {min}..{max}")]
    InvalidScale { question: String, min: i32, max: i32 },

    /// Emoji scale with no steps
    #[error("emoji question {0} has an empty scale")]
    EmptyEmojiScale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_display() {
        let err = DomainError::InvalidScale {
            question: "q1".to_string(),
            min: 5,
            max: 1,
        };
        assert!(err.to_string().contains("invalid range 5..1"));
    }
}
