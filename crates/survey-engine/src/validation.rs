//! Required-field validation
//!
//! A question fails iff it is required and its answer is absent or
//! empty (blank text, empty selection list). Non-required questions
//! never produce errors. Validation results are data, not errors:
//! field-keyed maps in question order.
//!
//! "Has an error" and "should display an error" are distinct queries:
//! display is gated on the touched flag so errors never appear before
//! first interaction.

use crate::answers::AnswerStore;
use indexmap::IndexMap;
use survey_domain::{AnswerValue, Question, QuestionId, SectionId};

/// Error message attached to unmet required fields
pub const REQUIRED_FIELD_MESSAGE: &str = "Este campo é obrigatório";

/// Unmet-required-field errors for a section, in question order
#[must_use]
pub fn validate(
    questions: &[Question],
    answers: &AnswerStore,
    section: SectionId,
) -> IndexMap<QuestionId, String> {
    let mut errors = IndexMap::new();
    for question in questions {
        if !question.is_required {
            continue;
        }
        let missing = answers
            .get(section, &question.id)
            .map_or(true, AnswerValue::is_empty);
        if missing {
            errors.insert(question.id.clone(), REQUIRED_FIELD_MESSAGE.to_string());
        }
    }
    errors
}

/// Whether a section passes validation and has at least one question
///
/// Zero-question sections are not "complete" by this check; the
/// orchestrator completes them trivially on acknowledgement (an
/// `advance` with an empty error map).
#[must_use]
pub fn is_complete(questions: &[Question], answers: &AnswerStore, section: SectionId) -> bool {
    !questions.is_empty() && validate(questions, answers, section).is_empty()
}

/// Raw error lookup for one field, ignoring the touched flag
#[must_use]
pub fn field_error(
    questions: &[Question],
    answers: &AnswerStore,
    section: SectionId,
    question: &QuestionId,
) -> Option<String> {
    validate(questions, answers, section).shift_remove(question)
}

/// Display-gated error lookup: `None` until the field was touched
#[must_use]
pub fn display_error(
    questions: &[Question],
    answers: &AnswerStore,
    section: SectionId,
    question: &QuestionId,
) -> Option<String> {
    if !answers.is_touched(section, question) {
        return None;
    }
    field_error(questions, answers, section, question)
}
