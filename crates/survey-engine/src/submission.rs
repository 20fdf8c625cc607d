//! Submission payload builder
//!
//! Groups answers per product section plus the two general sections,
//! denormalizing question text and type into each answer record so the
//! persisted result stays interpretable if the question catalog later
//! changes. Building is pure and repeatable; only the act of sending
//! is guarded (see the orchestrator's submission guard).

use crate::answers::AnswerStore;
use crate::sections::SectionPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use survey_domain::{
    AnswerValue, Edition, EditionId, ProductId, Question, QuestionId, QuestionType, SectionId,
};

/// One answer, denormalized with its question's text and type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Catalog question id
    pub question_id: QuestionId,
    /// Question text at submission time
    pub question_text: String,
    /// Question type at submission time
    pub question_type: QuestionType,
    /// Recorded value; `None` for unanswered optional questions
    pub answer: Option<AnswerValue>,
}

/// Answers for one product section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFeedback {
    /// Product under review
    pub product_id: ProductId,
    /// Product display name at submission time
    pub product_name: String,
    /// Answer records in question order
    pub answers: Vec<AnswerRecord>,
}

/// Answers for one of the two general sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralFeedback {
    /// Answer records in question order
    pub answers: Vec<AnswerRecord>,
}

/// The complete payload handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Per-product answer groups, in edition product order
    pub product_feedbacks: Vec<ProductFeedback>,
    /// Overall box experience answers
    pub experimentai_feedback: GeneralFeedback,
    /// Delivery experience answers
    pub delivery_feedback: GeneralFeedback,
    /// Edition the feedback belongs to
    pub edition_id: EditionId,
    /// Human-readable completion badge
    pub completion_badge: String,
}

/// Build the final payload from session state
///
/// Pure and side-effect free: safe to call repeatedly for display or
/// debugging. Sections whose questions never loaded contribute empty
/// answer lists.
#[must_use]
pub fn build_payload(
    edition: &Edition,
    plan: &SectionPlan,
    questions: &HashMap<SectionId, Arc<Vec<Question>>>,
    answers: &AnswerStore,
    completion_badge: &str,
) -> FeedbackPayload {
    let product_feedbacks = plan
        .iter()
        .filter_map(|info| {
            let product = info.product.as_ref()?;
            Some(ProductFeedback {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                answers: section_records(info.id, questions, answers),
            })
        })
        .collect();

    FeedbackPayload {
        product_feedbacks,
        experimentai_feedback: GeneralFeedback {
            answers: section_records(SectionId::Experimentai, questions, answers),
        },
        delivery_feedback: GeneralFeedback {
            answers: section_records(SectionId::Delivery, questions, answers),
        },
        edition_id: edition.edition_id.clone(),
        completion_badge: completion_badge.to_string(),
    }
}

fn section_records(
    section: SectionId,
    questions: &HashMap<SectionId, Arc<Vec<Question>>>,
    answers: &AnswerStore,
) -> Vec<AnswerRecord> {
    questions
        .get(&section)
        .map(|list| {
            list.iter()
                .map(|question| AnswerRecord {
                    question_id: question.id.clone(),
                    question_text: question.text.clone(),
                    question_type: question.question_type(),
                    answer: answers.get(section, &question.id).cloned(),
                })
                .collect()
        })
        .unwrap_or_default()
}
