//! External collaborator interfaces
//!
//! The engine treats identity, catalog, question repository and
//! persistence as abstract asynchronous operations. Implementations
//! live outside this crate; tests substitute mocks or in-memory fakes.

use crate::error::FetchError;
use crate::submission::FeedbackPayload;
use crate::types::{Respondent, SubmissionReceipt};
use async_trait::async_trait;
use survey_domain::{Category, Edition, EditionId, ProductId, Question};

#[cfg(test)]
use mockall::automock;

/// Identity/authorization collaborator
///
/// Exposes the respondent as an optional email plus a "may proceed"
/// flag, and the sign-out capability invoked on confirmed exit.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current respondent
    async fn resolve(&self) -> Result<Respondent, FetchError>;

    /// End the respondent's authenticated context
    async fn sign_out(&self) -> Result<(), FetchError>;
}

/// Edition/catalog collaborator
///
/// The active edition is fetched once before the session starts and is
/// immutable input afterwards.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EditionCatalog: Send + Sync {
    /// The edition currently eligible for feedback
    async fn active_edition(&self) -> Result<Edition, FetchError>;
}

/// Question repository collaborator
///
/// Both operations return zero-or-more questions; an empty list is a
/// valid result. Errors signal genuine transport/availability failures
/// only.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Questions globally scoped to a category (`product_id = null`)
    async fn questions_by_category(&self, category: Category)
        -> Result<Vec<Question>, FetchError>;

    /// Union of global and product-scoped questions for a category
    async fn questions_for_product(
        &self,
        category: Category,
        product_id: &ProductId,
    ) -> Result<Vec<Question>, FetchError>;
}

/// Persistence collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Persist a completed payload
    async fn submit(&self, payload: &FeedbackPayload) -> Result<SubmissionReceipt, FetchError>;

    /// Whether this respondent already submitted for this edition
    ///
    /// Consulted before session creation; an error here blocks the
    /// session (the engine fails closed).
    async fn has_already_submitted<'a>(
        &self,
        edition_id: &EditionId,
        respondent: Option<&'a str>,
    ) -> Result<bool, FetchError>;
}
