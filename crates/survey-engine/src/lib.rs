//! Survey Engine - orchestration for subscription-box feedback sessions
//!
//! Drives one respondent through one edition's feedback flow:
//! - question loading with caching, retry and graceful degradation
//! - a derived, immutable section plan (products, then the two general
//!   sections)
//! - validation-gated navigation with background prefetch
//! - exit with a confirmation step
//! - payload building and at-most-once submission
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use survey_engine::prelude::*;
//!
//! let mut session = SurveyOrchestrator::begin(
//!     EngineConfig::new(),
//!     identity,
//!     catalog,
//!     repository,
//!     sink,
//! )
//! .await?;
//!
//! session.update_answer(session.active_section(), question_id, AnswerValue::Number(5.0))?;
//! match session.advance().await? {
//!     AdvanceOutcome::Advanced(next) => { /* render `next` */ }
//!     AdvanceOutcome::ReadyToSubmit => { session.submit().await?; }
//!     AdvanceOutcome::Rejected(errors) => { /* display errors */ }
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod answers;
pub mod collaborators;
pub mod error;
pub mod orchestrator;
pub mod repository;
pub mod retry;
pub mod sections;
pub mod submission;
pub mod types;
pub mod validation;

// Re-exports
pub use answers::AnswerStore;
pub use collaborators::{EditionCatalog, FeedbackSink, IdentityProvider, QuestionRepository};
pub use error::{EngineError, FetchError};
pub use orchestrator::SurveyOrchestrator;
pub use repository::QuestionClient;
pub use retry::RetryPolicy;
pub use sections::{SectionInfo, SectionPlan, DELIVERY_LABEL, EXPERIMENTAI_LABEL};
pub use submission::{
    build_payload, AnswerRecord, FeedbackPayload, GeneralFeedback, ProductFeedback,
};
pub use types::{
    AdvanceOutcome, EngineConfig, Progress, Respondent, SessionId, SubmissionReceipt,
    SubmitOutcome,
};
pub use validation::REQUIRED_FIELD_MESSAGE;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a feedback session
    pub use crate::{
        AdvanceOutcome, EditionCatalog, EngineConfig, EngineError, FeedbackPayload, FeedbackSink,
        FetchError, IdentityProvider, Progress, QuestionRepository, Respondent, SubmitOutcome,
        SurveyOrchestrator,
    };
    pub use survey_domain::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
