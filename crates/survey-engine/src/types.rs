//! Core types for the survey engine
//!
//! Defines:
//! - Engine configuration
//! - Session identity and respondent projection
//! - Navigation and submission outcomes
//! - Progress reporting

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use survey_domain::{QuestionId, SectionId};
use ulid::Ulid;

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved respondent identity, as narrow as the engine needs it
///
/// `email = None` with `may_proceed = true` is an anonymous respondent;
/// whether that admits a session is an engine policy
/// (`EngineConfig::allow_anonymous`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respondent {
    /// Email-like identifier, when authenticated
    pub email: Option<String>,
    /// Whether the identity collaborator authorizes participation
    pub may_proceed: bool,
}

impl Respondent {
    /// Authorized, authenticated respondent
    #[inline]
    #[must_use]
    pub fn authorized(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            may_proceed: true,
        }
    }

    /// Anonymous respondent
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            email: None,
            may_proceed: true,
        }
    }

    /// Unauthorized respondent
    #[inline]
    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            email: None,
            may_proceed: false,
        }
    }
}

/// Receipt returned by the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Reference under which the payload was stored
    pub session_reference: String,
}

/// Session completion progress
///
/// `percentage` is exactly `completed * 100 / total`; recomputed from
/// the status map on every read, so repeated reads cannot drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Completed section count
    pub completed: usize,
    /// Total section count
    pub total: usize,
    /// Exact completion percentage
    pub percentage: f64,
}

impl Progress {
    /// Compute progress for `completed` of `total` sections
    #[inline]
    #[must_use]
    pub fn of(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64) * 100.0
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

/// Outcome of an `advance` call
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Active section completed; cursor moved to the given section
    Advanced(SectionId),
    /// Terminal section completed; the session may be submitted
    ReadyToSubmit,
    /// Validation failed; no transition happened
    ///
    /// Every listed field had its touched flag set so the errors are
    /// display-eligible immediately.
    Rejected(IndexMap<QuestionId, String>),
}

/// Outcome of a `submit` call
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Payload was delivered; the session is terminal
    Submitted(SubmissionReceipt),
    /// A submission was already in flight or already succeeded; no-op
    Ignored,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fetch attempts before a question load fails
    pub max_fetch_attempts: u32,
    /// Delay before the first fetch retry; doubles per attempt
    pub initial_retry_delay: Duration,
    /// Question cache capacity (entries, keyed by category + product)
    pub cache_capacity: u64,
    /// Whether anonymous respondents may start a session
    pub allow_anonymous: bool,
    /// Badge string stamped on the built payload
    pub completion_badge: String,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fetch attempt count
    #[inline]
    #[must_use]
    pub fn with_max_fetch_attempts(mut self, attempts: u32) -> Self {
        self.max_fetch_attempts = attempts.max(1);
        self
    }

    /// With initial retry delay
    #[inline]
    #[must_use]
    pub fn with_initial_retry_delay(mut self, delay: Duration) -> Self {
        self.initial_retry_delay = delay;
        self
    }

    /// Admit anonymous respondents
    #[inline]
    #[must_use]
    pub fn with_anonymous_allowed(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }

    /// With completion badge text
    #[inline]
    #[must_use]
    pub fn with_completion_badge(mut self, badge: impl Into<String>) -> Self {
        self.completion_badge = badge.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_fetch_attempts: 3,
            initial_retry_delay: Duration::from_secs(1),
            cache_capacity: 64,
            allow_anonymous: false,
            completion_badge: "Testador Expert da Experimentaí".to_string(),
        }
    }
}
