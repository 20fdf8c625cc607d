//! Survey orchestrator
//!
//! The state machine that sequences sections:
//! - validation-gated forward navigation with background prefetch
//! - back navigation that preserves answers and completion status
//! - exit with a confirmation step and sign-out on confirm
//! - duplicate-submission guard with at-most-once delivery
//!
//! The orchestrator exclusively owns the session state. All state
//! transitions happen as discrete, serialized reactions to user input
//! or completed fetches (`&mut self` methods in a single dispatch
//! loop); other components read projections or request mutations
//! through the narrow operations here. Prefetch only warms the shared
//! question cache and never touches session state, so a stale prefetch
//! cannot mutate a session after exit.

use crate::answers::AnswerStore;
use crate::collaborators::{EditionCatalog, FeedbackSink, IdentityProvider, QuestionRepository};
use crate::error::EngineError;
use crate::repository::QuestionClient;
use crate::retry::RetryPolicy;
use crate::sections::{SectionInfo, SectionPlan};
use crate::submission::{build_payload, FeedbackPayload};
use crate::types::{
    AdvanceOutcome, EngineConfig, Progress, Respondent, SessionId, SubmitOutcome,
};
use crate::validation;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use survey_domain::{
    AnswerValue, Category, Edition, Question, QuestionId, SectionId, SectionStatus,
};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    /// Normal interaction
    Active,
    /// Exit requested, awaiting confirm/cancel
    ExitRequested,
    /// Payload delivered; the session is terminal
    Submitted,
    /// Exit confirmed; the session is discarded
    Ended,
}

/// The survey orchestrator
///
/// Owns the session aggregate: section statuses, answers, loaded
/// questions, the active cursor and the submission guard.
pub struct SurveyOrchestrator {
    config: EngineConfig,
    identity: Arc<dyn IdentityProvider>,
    sink: Arc<dyn FeedbackSink>,
    questions: QuestionClient,

    session_id: SessionId,
    respondent: Respondent,
    edition: Edition,
    plan: SectionPlan,
    statuses: IndexMap<SectionId, SectionStatus>,
    loaded: HashMap<SectionId, Arc<Vec<Question>>>,
    answers: AnswerStore,
    active: SectionId,
    phase: SessionPhase,
    submission_in_flight: bool,
}

impl SurveyOrchestrator {
    /// Start a feedback session
    ///
    /// Resolves the respondent, runs the duplicate-submission
    /// pre-check, fetches the active edition, derives the section plan
    /// and activates the first section (loading its questions and
    /// prefetching the next product section in the background).
    ///
    /// Eligibility fails closed: an unresolved identity, an
    /// unauthorized respondent, an anonymous respondent without
    /// `allow_anonymous`, or an unverifiable pre-check all block
    /// session creation.
    ///
    /// # Errors
    /// - `EngineError::Identity` when the identity lookup fails
    /// - `EngineError::NotEligible` for unauthorized or disallowed
    ///   anonymous respondents
    /// - `EngineError::EligibilityUnverified` when the pre-check fails
    /// - `EngineError::AlreadySubmitted` on a positive pre-check
    /// - `EngineError::Edition` when the edition lookup fails
    /// - `EngineError::Fetch` when the first section's questions
    ///   cannot be loaded
    pub async fn begin(
        config: EngineConfig,
        identity: Arc<dyn IdentityProvider>,
        catalog: Arc<dyn EditionCatalog>,
        repository: Arc<dyn QuestionRepository>,
        sink: Arc<dyn FeedbackSink>,
    ) -> Result<Self, EngineError> {
        let respondent = identity.resolve().await.map_err(EngineError::Identity)?;
        if !respondent.may_proceed {
            return Err(EngineError::NotEligible);
        }
        if respondent.email.is_none() && !config.allow_anonymous {
            tracing::info!("anonymous respondent blocked by policy");
            return Err(EngineError::NotEligible);
        }

        let edition = catalog
            .active_edition()
            .await
            .map_err(EngineError::Edition)?;

        let already = sink
            .has_already_submitted(&edition.edition_id, respondent.email.as_deref())
            .await
            .map_err(EngineError::EligibilityUnverified)?;
        if already {
            return Err(EngineError::AlreadySubmitted(edition.edition_id));
        }

        let plan = SectionPlan::derive(&edition);
        let statuses = plan
            .ids()
            .into_iter()
            .map(|id| (id, SectionStatus::Pending))
            .collect();
        let questions = QuestionClient::new(
            repository,
            RetryPolicy::new(config.max_fetch_attempts, config.initial_retry_delay),
            config.cache_capacity,
        );

        let first = plan.first();
        let mut orchestrator = Self {
            config,
            identity,
            sink,
            questions,
            session_id: SessionId::new(),
            respondent,
            edition,
            plan,
            statuses,
            loaded: HashMap::new(),
            answers: AnswerStore::new(),
            active: first,
            phase: SessionPhase::Active,
            submission_in_flight: false,
        };

        tracing::info!(
            session = %orchestrator.session_id,
            edition = %orchestrator.edition.edition_id,
            sections = orchestrator.plan.len(),
            "feedback session started"
        );

        orchestrator.activate(first).await?;
        Ok(orchestrator)
    }

    // ---- projections -------------------------------------------------

    /// Session identifier
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The respondent this session belongs to
    #[inline]
    #[must_use]
    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    /// The edition under review
    #[inline]
    #[must_use]
    pub fn edition(&self) -> &Edition {
        &self.edition
    }

    /// The derived, immutable section plan
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &SectionPlan {
        &self.plan
    }

    /// Currently active section
    #[inline]
    #[must_use]
    pub fn active_section(&self) -> SectionId {
        self.active
    }

    /// Lifecycle status of a section
    #[must_use]
    pub fn section_status(&self, section: SectionId) -> Option<SectionStatus> {
        self.statuses.get(&section).copied()
    }

    /// Loaded questions for a section; `None` until its first activation
    #[must_use]
    pub fn questions(&self, section: SectionId) -> Option<&[Question]> {
        self.loaded.get(&section).map(|list| list.as_slice())
    }

    /// Current answer for a question
    #[must_use]
    pub fn answer(&self, section: SectionId, question: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(section, question)
    }

    /// Exact completion progress
    #[must_use]
    pub fn progress(&self) -> Progress {
        let completed = self
            .statuses
            .values()
            .filter(|status| status.is_completed())
            .count();
        Progress::of(completed, self.plan.len())
    }

    /// Whether every section is completed
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.statuses.values().all(SectionStatus::is_completed)
    }

    /// Sections not yet completed, in plan order
    #[must_use]
    pub fn incomplete_sections(&self) -> Vec<SectionId> {
        self.statuses
            .iter()
            .filter(|(_, status)| !status.is_completed())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether an exit confirmation is pending
    #[inline]
    #[must_use]
    pub fn is_exit_requested(&self) -> bool {
        self.phase == SessionPhase::ExitRequested
    }

    /// Whether the session reached a terminal state
    #[inline]
    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitted | SessionPhase::Ended)
    }

    // ---- answers and validation --------------------------------------

    /// Record an answer, overwriting any previous value
    ///
    /// # Errors
    /// `EngineError::UnknownSection` for a section outside the plan;
    /// `EngineError::SessionEnded` / `ExitPending` per session phase.
    pub fn update_answer(
        &mut self,
        section: SectionId,
        question: QuestionId,
        value: AnswerValue,
    ) -> Result<(), EngineError> {
        self.ensure_interactive()?;
        self.ensure_known(section)?;
        self.answers.set(section, question, value);
        Ok(())
    }

    /// Mark a field as interacted with (e.g. on blur)
    ///
    /// # Errors
    /// Same conditions as [`Self::update_answer`].
    pub fn touch_field(
        &mut self,
        section: SectionId,
        question: QuestionId,
    ) -> Result<(), EngineError> {
        self.ensure_interactive()?;
        self.ensure_known(section)?;
        self.answers.touch(section, question);
        Ok(())
    }

    /// Unmet-required-field errors for a section
    ///
    /// # Errors
    /// `EngineError::UnknownSection` for a section outside the plan.
    pub fn validate_section(
        &self,
        section: SectionId,
    ) -> Result<IndexMap<QuestionId, String>, EngineError> {
        self.ensure_known(section)?;
        Ok(validation::validate(
            self.questions_or_empty(section),
            &self.answers,
            section,
        ))
    }

    /// Whether a section passes validation and has at least one question
    ///
    /// # Errors
    /// `EngineError::UnknownSection` for a section outside the plan.
    pub fn is_section_complete(&self, section: SectionId) -> Result<bool, EngineError> {
        self.ensure_known(section)?;
        Ok(validation::is_complete(
            self.questions_or_empty(section),
            &self.answers,
            section,
        ))
    }

    /// Raw error lookup for one field, ignoring the touched flag
    #[must_use]
    pub fn has_field_error(&self, section: SectionId, question: &QuestionId) -> bool {
        validation::field_error(self.questions_or_empty(section), &self.answers, section, question)
            .is_some()
    }

    /// Display-gated error for one field: `None` until it was touched
    #[must_use]
    pub fn field_error(&self, section: SectionId, question: &QuestionId) -> Option<String> {
        validation::display_error(
            self.questions_or_empty(section),
            &self.answers,
            section,
            question,
        )
    }

    /// Whether a field was interacted with
    #[must_use]
    pub fn is_field_touched(&self, section: SectionId, question: &QuestionId) -> bool {
        self.answers.is_touched(section, question)
    }

    // ---- navigation --------------------------------------------------

    /// Complete the active section and move forward
    ///
    /// If validation fails, every erroring field's touched flag is set
    /// (so the errors become display-eligible) and no transition
    /// happens. From the terminal section a successful validation
    /// completes it and signals submission-readiness instead of moving.
    ///
    /// # Errors
    /// `EngineError::SessionEnded` / `ExitPending` per session phase;
    /// `EngineError::Fetch` when the next section's questions cannot
    /// be loaded.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, EngineError> {
        self.ensure_interactive()?;
        let section = self.active;

        let errors = validation::validate(
            self.questions_or_empty(section),
            &self.answers,
            section,
        );
        if !errors.is_empty() {
            for question in errors.keys() {
                self.answers.touch(section, question.clone());
            }
            tracing::debug!(%section, errors = errors.len(), "advance rejected by validation");
            return Ok(AdvanceOutcome::Rejected(errors));
        }

        self.statuses.insert(section, SectionStatus::Completed);
        tracing::debug!(%section, "section completed");

        match self.plan.next_after(section) {
            None => Ok(AdvanceOutcome::ReadyToSubmit),
            Some(next) => {
                self.activate(next).await?;
                Ok(AdvanceOutcome::Advanced(next))
            }
        }
    }

    /// Re-activate the previous section
    ///
    /// The section being left keeps its answers and status; the
    /// re-activated section keeps `Completed` if it had it and its
    /// questions stay cached (no refetch).
    ///
    /// # Errors
    /// `EngineError::AtFirstSection` from the first section;
    /// `EngineError::SessionEnded` / `ExitPending` per session phase.
    pub fn go_back(&mut self) -> Result<SectionId, EngineError> {
        self.ensure_interactive()?;
        let previous = self
            .plan
            .previous_before(self.active)
            .ok_or(EngineError::AtFirstSection)?;

        if self.section_status(previous) != Some(SectionStatus::Completed) {
            self.statuses.insert(previous, SectionStatus::InProgress);
        }
        self.active = previous;
        tracing::debug!(section = %previous, "navigated back");
        Ok(previous)
    }

    // ---- exit --------------------------------------------------------

    /// Request to exit; must be confirmed before anything is discarded
    ///
    /// # Errors
    /// `EngineError::SubmissionInFlight` while a submission runs;
    /// `EngineError::SessionEnded` after a terminal state.
    pub fn request_exit(&mut self) -> Result<(), EngineError> {
        self.ensure_not_ended()?;
        if self.submission_in_flight {
            return Err(EngineError::SubmissionInFlight);
        }
        self.phase = SessionPhase::ExitRequested;
        Ok(())
    }

    /// Keep the session; clears a pending exit request
    pub fn cancel_exit(&mut self) {
        if self.phase == SessionPhase::ExitRequested {
            self.phase = SessionPhase::Active;
        }
    }

    /// Discard the session and sign the respondent out
    ///
    /// The phase flips to `Ended` before the sign-out call, so no
    /// in-flight operation can mutate the session afterwards. A
    /// sign-out failure is logged, not surfaced: the local session is
    /// gone either way.
    ///
    /// # Errors
    /// `EngineError::ExitNotRequested` without a preceding request;
    /// `EngineError::SubmissionInFlight` while a submission runs.
    pub async fn confirm_exit(&mut self) -> Result<(), EngineError> {
        self.ensure_not_ended()?;
        if self.submission_in_flight {
            return Err(EngineError::SubmissionInFlight);
        }
        if self.phase != SessionPhase::ExitRequested {
            return Err(EngineError::ExitNotRequested);
        }

        self.phase = SessionPhase::Ended;
        tracing::info!(session = %self.session_id, "session discarded on exit");
        if let Err(err) = self.identity.sign_out().await {
            tracing::warn!(error = %err, "sign-out failed after exit");
        }
        Ok(())
    }

    // ---- submission --------------------------------------------------

    /// Build the submission payload (pure, repeatable)
    #[must_use]
    pub fn build_payload(&self) -> FeedbackPayload {
        build_payload(
            &self.edition,
            &self.plan,
            &self.loaded,
            &self.answers,
            &self.config.completion_badge,
        )
    }

    /// Deliver the payload to the persistence collaborator
    ///
    /// At-most-once semantics: the guard flag is set before the
    /// outbound call and only reset on failure, so the identical
    /// payload may be retried. A second call while the flag is set, or
    /// after success, is a no-op (`SubmitOutcome::Ignored`), never a
    /// queued retry.
    ///
    /// # Errors
    /// `EngineError::IncompleteSections` when sections remain open;
    /// `EngineError::Submission` when the outbound call fails (the
    /// guard is released and session state is kept for retry).
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EngineError> {
        match self.phase {
            SessionPhase::Submitted => return Ok(SubmitOutcome::Ignored),
            SessionPhase::Ended => return Err(EngineError::SessionEnded),
            SessionPhase::ExitRequested => return Err(EngineError::ExitPending),
            SessionPhase::Active => {}
        }
        if self.submission_in_flight {
            return Ok(SubmitOutcome::Ignored);
        }
        if !self.can_submit() {
            return Err(EngineError::IncompleteSections(self.incomplete_sections()));
        }

        self.submission_in_flight = true;
        let payload = self.build_payload();
        tracing::info!(session = %self.session_id, edition = %self.edition.edition_id, "submitting feedback");

        match self.sink.submit(&payload).await {
            Ok(receipt) => {
                self.phase = SessionPhase::Submitted;
                tracing::info!(reference = %receipt.session_reference, "feedback submitted");
                Ok(SubmitOutcome::Submitted(receipt))
            }
            Err(err) => {
                self.submission_in_flight = false;
                tracing::warn!(error = %err, "submission failed, guard released for retry");
                Err(EngineError::Submission(err))
            }
        }
    }

    // ---- internals ---------------------------------------------------

    /// Activate a section: questions first, then status and cursor
    ///
    /// The fetch happens before any state change, so a failed load
    /// leaves the session where it was and the same call can be
    /// retried.
    async fn activate(&mut self, section: SectionId) -> Result<(), EngineError> {
        self.ensure_questions(section).await?;
        if self.section_status(section) != Some(SectionStatus::Completed) {
            self.statuses.insert(section, SectionStatus::InProgress);
        }
        self.active = section;
        self.spawn_prefetch_after(section);
        Ok(())
    }

    /// Load a section's questions unless already loaded
    ///
    /// Shares the prefetch cache: an `advance` racing a prefetch for
    /// the same section awaits the same in-flight load.
    async fn ensure_questions(&mut self, section: SectionId) -> Result<(), EngineError> {
        if self.loaded.contains_key(&section) {
            return Ok(());
        }
        let product_id = self
            .plan
            .get(section)
            .and_then(|info: &SectionInfo| info.product.as_ref())
            .map(|product| product.id.clone());
        let questions = self
            .questions
            .fetch(section.category(), product_id.as_ref())
            .await?;
        tracing::debug!(%section, count = questions.len(), "questions loaded");
        self.loaded.insert(section, questions);
        Ok(())
    }

    /// Background-prefetch the next product section's questions
    ///
    /// Only when the given section is a product section and not the
    /// last one. The task only warms the shared cache; failures are
    /// swallowed and retried lazily on demand.
    fn spawn_prefetch_after(&self, section: SectionId) {
        let Some(index) = section.product_index() else {
            return;
        };
        let next_index = index + 1;
        if next_index >= self.plan.product_count() {
            return;
        }
        let Some(product) = self
            .plan
            .get(SectionId::Product(next_index))
            .and_then(|info| info.product.clone())
        else {
            return;
        };

        let client = self.questions.clone();
        tokio::spawn(async move {
            client.prefetch(Category::Product, Some(product.id)).await;
        });
    }

    fn questions_or_empty(&self, section: SectionId) -> &[Question] {
        self.loaded
            .get(&section)
            .map_or(&[], |list| list.as_slice())
    }

    fn ensure_known(&self, section: SectionId) -> Result<(), EngineError> {
        if self.plan.get(section).is_none() {
            return Err(EngineError::UnknownSection(section));
        }
        Ok(())
    }

    fn ensure_not_ended(&self) -> Result<(), EngineError> {
        if self.is_ended() {
            return Err(EngineError::SessionEnded);
        }
        Ok(())
    }

    fn ensure_interactive(&self) -> Result<(), EngineError> {
        self.ensure_not_ended()?;
        if self.phase == SessionPhase::ExitRequested {
            return Err(EngineError::ExitPending);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SurveyOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyOrchestrator")
            .field("session_id", &self.session_id)
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("progress", &self.progress())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        MockEditionCatalog, MockFeedbackSink, MockIdentityProvider, MockQuestionRepository,
    };
    use crate::error::FetchError;
    use survey_domain::{Product, QuestionKind, ScaleConfig};

    fn edition() -> Edition {
        Edition::new("ed-1", "Edição Teste", vec![Product::new("p1", "Produto 1")])
    }

    fn identity(respondent: Respondent) -> MockIdentityProvider {
        let mut mock = MockIdentityProvider::new();
        mock.expect_resolve().returning(move || Ok(respondent.clone()));
        mock
    }

    fn catalog() -> MockEditionCatalog {
        let mut mock = MockEditionCatalog::new();
        mock.expect_active_edition().returning(|| Ok(edition()));
        mock
    }

    fn repository() -> MockQuestionRepository {
        let mut mock = MockQuestionRepository::new();
        mock.expect_questions_for_product().returning(|_, _| {
            Ok(vec![Question::new(
                "q1",
                Category::Product,
                "Como foi?",
                QuestionKind::Rating(ScaleConfig::default()),
            )
            .unwrap()
            .required()])
        });
        mock.expect_questions_by_category().returning(|_| Ok(vec![]));
        mock
    }

    fn fresh_sink() -> MockFeedbackSink {
        let mut mock = MockFeedbackSink::new();
        mock.expect_has_already_submitted().returning(|_, _| Ok(false));
        mock
    }

    async fn begin_with(
        config: EngineConfig,
        identity: MockIdentityProvider,
        sink: MockFeedbackSink,
    ) -> Result<SurveyOrchestrator, EngineError> {
        SurveyOrchestrator::begin(
            config,
            Arc::new(identity),
            Arc::new(catalog()),
            Arc::new(repository()),
            Arc::new(sink),
        )
        .await
    }

    #[tokio::test]
    async fn begin_activates_first_section() {
        let orchestrator = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            fresh_sink(),
        )
        .await
        .unwrap();

        assert_eq!(orchestrator.active_section(), SectionId::Product(0));
        assert_eq!(
            orchestrator.section_status(SectionId::Product(0)),
            Some(SectionStatus::InProgress)
        );
        assert_eq!(
            orchestrator.section_status(SectionId::Delivery),
            Some(SectionStatus::Pending)
        );
        assert!(orchestrator.questions(SectionId::Product(0)).is_some());
        assert_eq!(orchestrator.progress().completed, 0);
    }

    #[tokio::test]
    async fn unauthorized_respondent_is_rejected() {
        let result = begin_with(
            EngineConfig::new(),
            identity(Respondent::unauthorized()),
            fresh_sink(),
        )
        .await;
        assert!(matches!(result, Err(EngineError::NotEligible)));
    }

    #[tokio::test]
    async fn anonymous_blocked_by_default_admitted_by_policy() {
        let blocked = begin_with(
            EngineConfig::new(),
            identity(Respondent::anonymous()),
            fresh_sink(),
        )
        .await;
        assert!(matches!(blocked, Err(EngineError::NotEligible)));

        let admitted = begin_with(
            EngineConfig::new().with_anonymous_allowed(),
            identity(Respondent::anonymous()),
            fresh_sink(),
        )
        .await;
        assert!(admitted.is_ok());
    }

    #[tokio::test]
    async fn duplicate_precheck_blocks_session() {
        let mut sink = MockFeedbackSink::new();
        sink.expect_has_already_submitted().returning(|_, _| Ok(true));

        let result = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            sink,
        )
        .await;
        assert!(matches!(result, Err(EngineError::AlreadySubmitted(_))));
    }

    #[tokio::test]
    async fn unverifiable_precheck_fails_closed() {
        let mut sink = MockFeedbackSink::new();
        sink.expect_has_already_submitted()
            .returning(|_, _| Err(FetchError::Unavailable("store down".to_string())));

        let result = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            sink,
        )
        .await;
        assert!(matches!(result, Err(EngineError::EligibilityUnverified(_))));
    }

    #[tokio::test]
    async fn advance_rejection_touches_erroring_fields() {
        let mut orchestrator = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            fresh_sink(),
        )
        .await
        .unwrap();

        let qid = QuestionId::new("q1");
        assert!(!orchestrator.is_field_touched(SectionId::Product(0), &qid));

        let outcome = orchestrator.advance().await.unwrap();
        let AdvanceOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert!(errors.contains_key(&qid));
        assert!(orchestrator.is_field_touched(SectionId::Product(0), &qid));
        assert!(orchestrator.field_error(SectionId::Product(0), &qid).is_some());
        // No transition happened
        assert_eq!(orchestrator.active_section(), SectionId::Product(0));
        assert_eq!(
            orchestrator.section_status(SectionId::Product(0)),
            Some(SectionStatus::InProgress)
        );
    }

    #[tokio::test]
    async fn go_back_from_first_section_fails() {
        let mut orchestrator = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            fresh_sink(),
        )
        .await
        .unwrap();

        assert!(matches!(
            orchestrator.go_back(),
            Err(EngineError::AtFirstSection)
        ));
    }

    #[tokio::test]
    async fn exit_needs_request_then_confirm() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_resolve()
            .returning(|| Ok(Respondent::authorized("a@b.c")));
        identity.expect_sign_out().times(1).returning(|| Ok(()));

        let mut orchestrator = begin_with(EngineConfig::new(), identity, fresh_sink())
            .await
            .unwrap();

        assert!(matches!(
            orchestrator.confirm_exit().await,
            Err(EngineError::ExitNotRequested)
        ));

        orchestrator.request_exit().unwrap();
        assert!(orchestrator.is_exit_requested());
        // Interaction is blocked while the confirmation is pending
        assert!(matches!(
            orchestrator.update_answer(
                SectionId::Product(0),
                QuestionId::new("q1"),
                AnswerValue::Number(5.0),
            ),
            Err(EngineError::ExitPending)
        ));

        orchestrator.cancel_exit();
        assert!(!orchestrator.is_exit_requested());

        orchestrator.request_exit().unwrap();
        orchestrator.confirm_exit().await.unwrap();
        assert!(orchestrator.is_ended());
        assert!(matches!(
            orchestrator.request_exit(),
            Err(EngineError::SessionEnded)
        ));
    }

    #[tokio::test]
    async fn submit_with_incomplete_sections_fails() {
        let mut orchestrator = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            fresh_sink(),
        )
        .await
        .unwrap();

        let result = orchestrator.submit().await;
        let Err(EngineError::IncompleteSections(sections)) = result else {
            panic!("expected incomplete-sections error");
        };
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], SectionId::Product(0));
    }

    #[tokio::test]
    async fn unknown_section_is_rejected() {
        let mut orchestrator = begin_with(
            EngineConfig::new(),
            identity(Respondent::authorized("a@b.c")),
            fresh_sink(),
        )
        .await
        .unwrap();

        assert!(matches!(
            orchestrator.update_answer(
                SectionId::Product(9),
                QuestionId::new("q1"),
                AnswerValue::Number(1.0),
            ),
            Err(EngineError::UnknownSection(_))
        ));
        assert!(orchestrator.validate_section(SectionId::Product(9)).is_err());
    }
}
