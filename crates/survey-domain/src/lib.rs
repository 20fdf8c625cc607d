//! Survey Domain - types shared by the feedback survey engine
//!
//! Defines the vocabulary of a feedback session:
//! - Questions as a closed tagged variant over the five question kinds
//! - Answer values and their emptiness rules
//! - Editions and their product lists
//! - Section identity and lifecycle status
//!
//! No async, no I/O: the engine crate layers orchestration on top.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod answer;
pub mod edition;
pub mod error;
pub mod question;
pub mod section;

// Re-exports for convenience
pub use answer::AnswerValue;
pub use edition::{Edition, EditionId, Product, ProductId};
pub use error::DomainError;
pub use question::{
    Category, ChoiceConfig, ChoiceOption, EmojiScaleConfig, EmojiStep, Question, QuestionId,
    QuestionKind, QuestionType, ScaleConfig, TextConfig,
};
pub use section::{SectionId, SectionStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with survey domain types
    pub use crate::{
        AnswerValue, Category, Edition, EditionId, Product, ProductId, Question, QuestionId,
        QuestionKind, QuestionType, SectionId, SectionStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
