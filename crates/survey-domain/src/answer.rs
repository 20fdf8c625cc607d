//! Answer values
//!
//! One live value per (section, question) pair; the engine's answer
//! store overwrites on change, never appends. The shape depends on the
//! question kind: ratings record numbers, choices record option values,
//! and so on.

use serde::{Deserialize, Serialize};

/// A recorded answer value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Numeric rating or emoji scale value
    Number(f64),
    /// Boolean question answer
    Bool(bool),
    /// Free-text answer
    Text(String),
    /// Selected option value of a single-choice question
    Selection(String),
    /// Selected option values of a multi-select question
    MultiSelection(Vec<String>),
}

impl AnswerValue {
    /// Whether the value counts as empty for required-field validation
    ///
    /// Text is empty after trimming; a multi-selection is empty without
    /// elements. Numbers and booleans are never empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Number(_) | AnswerValue::Bool(_) => false,
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Selection(value) => value.trim().is_empty(),
            AnswerValue::MultiSelection(values) => values.is_empty(),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
