//! Error types for the survey engine
//!
//! Two layers:
//! - `FetchError`: transport/availability failures of the external
//!   collaborators; recovered locally by degradation or scoped retry
//! - `EngineError`: session-level failures surfaced to the caller
//!
//! Validation problems are never errors; they travel as field-keyed
//! maps so the respondent always sees why progression is blocked.

use survey_domain::{EditionId, SectionId};

/// Transport/availability failure of an external collaborator
///
/// "No questions" is not an error; collaborators return an empty list
/// for that. Cloneable so a shared in-flight cache load can hand the
/// same failure to every waiter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Request reached the collaborator but failed in transit
    #[error("transport failure: {0}")]
    Transport(String),

    /// Collaborator is unreachable or refused the request
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Respondent identity could not be resolved
    #[error("identity could not be resolved: {0}")]
    Identity(#[source] FetchError),

    /// Respondent is not allowed to start a session
    #[error("respondent is not eligible for this survey")]
    NotEligible,

    /// Duplicate-submission pre-check failed; the engine fails closed
    #[error("duplicate-submission check could not be verified: {0}")]
    EligibilityUnverified(#[source] FetchError),

    /// One submission per respondent per edition
    #[error("feedback for edition {0} was already submitted")]
    AlreadySubmitted(EditionId),

    /// Active edition could not be resolved
    #[error("active edition could not be resolved: {0}")]
    Edition(#[source] FetchError),

    /// Question fetch failed after degradation and retries
    #[error("question fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Section id not part of the derived plan
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    /// `go_back` from the first section
    #[error("already at the first section")]
    AtFirstSection,

    /// Navigation attempted while an exit confirmation is pending
    #[error("an exit confirmation is pending")]
    ExitPending,

    /// `confirm_exit` without a preceding `request_exit`
    #[error("no exit was requested")]
    ExitNotRequested,

    /// Exit attempted while a submission is in flight
    #[error("a submission is in flight")]
    SubmissionInFlight,

    /// Submit attempted with sections still open
    #[error("sections incomplete: {0:?}")]
    IncompleteSections(Vec<SectionId>),

    /// Outbound persistence call failed; the guard was released
    #[error("submission failed: {0}")]
    Submission(#[source] FetchError),

    /// Session was ended by exit or a successful submission
    #[error("session has ended")]
    SessionEnded,
}

impl EngineError {
    /// Whether the same call may be retried without losing session state
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Identity(_)
                | Self::Edition(_)
                | Self::Fetch(_)
                | Self::Submission(_)
                | Self::EligibilityUnverified(_)
        )
    }

    /// Whether the failure ends the whole session rather than a section
    #[inline]
    #[must_use]
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotEligible | Self::AlreadySubmitted(_) | Self::SessionEnded
        )
    }
}
