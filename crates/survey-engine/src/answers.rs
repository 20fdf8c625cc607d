//! In-memory answer store
//!
//! Per-section map of question id to answer value plus a per-section
//! touched set. The orchestrator owns the store; the rendering layer
//! reaches it only through the orchestrator's narrow operations.
//!
//! One live value per (section, question) pair: `set` overwrites,
//! never appends.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use survey_domain::{AnswerValue, QuestionId, SectionId};

/// Answers and touched flags for one session
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: HashMap<SectionId, IndexMap<QuestionId, AnswerValue>>,
    touched: HashMap<SectionId, HashSet<QuestionId>>,
}

impl AnswerStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any previous value
    pub fn set(&mut self, section: SectionId, question: QuestionId, value: AnswerValue) {
        self.answers.entry(section).or_default().insert(question, value);
    }

    /// Current value for a question, if any
    #[inline]
    #[must_use]
    pub fn get(&self, section: SectionId, question: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(&section).and_then(|map| map.get(question))
    }

    /// All answers recorded for a section, in insertion order
    #[must_use]
    pub fn section_answers(
        &self,
        section: SectionId,
    ) -> Option<&IndexMap<QuestionId, AnswerValue>> {
        self.answers.get(&section)
    }

    /// Mark a field as interacted with (blur or failed proceed attempt)
    pub fn touch(&mut self, section: SectionId, question: QuestionId) {
        self.touched.entry(section).or_default().insert(question);
    }

    /// Whether a field was interacted with
    #[inline]
    #[must_use]
    pub fn is_touched(&self, section: SectionId, question: &QuestionId) -> bool {
        self.touched
            .get(&section)
            .is_some_and(|set| set.contains(question))
    }

    /// Count of answered questions in a section
    #[must_use]
    pub fn answered_count(&self, section: SectionId) -> usize {
        self.answers.get(&section).map_or(0, IndexMap::len)
    }
}
