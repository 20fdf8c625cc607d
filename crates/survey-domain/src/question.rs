//! Question definitions
//!
//! A question is fetched from the catalog by category (and optional
//! product scope) and carries a type-specific configuration. The five
//! question kinds are a closed enum: adding a kind is a compile-time
//! checked change, not a runtime registration.

use crate::edition::ProductId;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Opaque question identifier (assigned by the catalog)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    /// Create from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question category - one per survey topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Per-product sub-surveys
    Product,
    /// Overall box experience
    Experimentai,
    /// Delivery experience
    Delivery,
}

impl Category {
    /// Wire/catalog name for this category
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Product => "product",
            Category::Experimentai => "experimentai",
            Category::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric scale configuration (e.g. 1-5 stars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Lowest selectable value (inclusive)
    pub min: i32,
    /// Highest selectable value (inclusive)
    pub max: i32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

/// One step of an emoji scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiStep {
    /// Numeric value recorded when selected
    pub value: i32,
    /// Emoji glyph
    pub emoji: String,
    /// Short label shown under the emoji
    pub label: String,
}

/// Emoji scale configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmojiScaleConfig {
    /// Ordered scale steps, lowest first
    pub scale: Vec<EmojiStep>,
}

/// A selectable option of a choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value recorded when selected
    pub value: String,
    /// Display label
    pub label: String,
    /// Optional icon reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ChoiceOption {
    /// Create option without icon
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }

    /// With icon
    #[inline]
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Choice question configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceConfig {
    /// Ordered options; never empty for a valid question
    pub options: Vec<ChoiceOption>,
    /// Whether several options may be selected at once
    #[serde(default)]
    pub multiple: bool,
}

/// Free-text configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextConfig {
    /// Placeholder shown while the field is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Suggested number of input rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u8>,
}

/// Closed tagged variant over the five question kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Numeric scale rating
    Rating(ScaleConfig),
    /// Emoji scale rating
    EmojiRating(EmojiScaleConfig),
    /// Single or multiple choice
    MultipleChoice(ChoiceConfig),
    /// Free text
    Text(TextConfig),
    /// Yes/no
    Boolean,
}

impl QuestionKind {
    /// Discriminant of this kind
    #[inline]
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Rating(_) => QuestionType::Rating,
            QuestionKind::EmojiRating(_) => QuestionType::EmojiRating,
            QuestionKind::MultipleChoice(_) => QuestionType::MultipleChoice,
            QuestionKind::Text(_) => QuestionType::Text,
            QuestionKind::Boolean => QuestionType::Boolean,
        }
    }
}

/// Question type discriminant (wire names match the catalog schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Rating,
    EmojiRating,
    MultipleChoice,
    Text,
    Boolean,
}

impl QuestionType {
    /// Wire name for this type
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Rating => "rating",
            QuestionType::EmojiRating => "emoji_rating",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Text => "text",
            QuestionType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question definition
///
/// `product_id = None` means the question is global within its category
/// and shows for every product section of that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Catalog identifier
    pub id: QuestionId,
    /// Owning category
    pub category: Category,
    /// Product scope; `None` means global within the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Question text shown to the respondent
    pub text: String,
    /// Type-specific configuration
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Whether an answer is mandatory
    pub is_required: bool,
    /// Ascending display order; ties keep insertion order
    pub order_index: i32,
}

impl Question {
    /// Create a question, enforcing the kind invariants
    ///
    /// # Errors
    /// - `DomainError::EmptyOptions` for a choice question without options
    /// - `DomainError::InvalidScale` for a scale with `min >= max`
    /// - `DomainError::EmptyEmojiScale` for an emoji scale without steps
    pub fn new(
        id: impl Into<QuestionId>,
        category: Category,
        text: impl Into<String>,
        kind: QuestionKind,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        match &kind {
            QuestionKind::Rating(scale) if scale.min >= scale.max => {
                return Err(DomainError::InvalidScale {
                    question: id.to_string(),
                    min: scale.min,
                    max: scale.max,
                });
            }
            QuestionKind::MultipleChoice(choice) if choice.options.is_empty() => {
                return Err(DomainError::EmptyOptions(id.to_string()));
            }
            QuestionKind::EmojiRating(emoji) if emoji.scale.is_empty() => {
                return Err(DomainError::EmptyEmojiScale(id.to_string()));
            }
            _ => {}
        }

        Ok(Self {
            id,
            category,
            product_id: None,
            text: text.into(),
            kind,
            is_required: false,
            order_index: 0,
        })
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Scope to a specific product
    #[inline]
    #[must_use]
    pub fn with_product(mut self, product_id: impl Into<ProductId>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// With display order index
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    /// Discriminant of the question kind
    #[inline]
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Whether this question applies globally within its category
    #[inline]
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.product_id.is_none()
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
