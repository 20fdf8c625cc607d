//! Section identity and lifecycle status
//!
//! A session has one section per product in the edition, followed by
//! the two fixed general sections. The engine derives the ordered list;
//! this module only defines identity and status.

use crate::question::Category;
use serde::{Deserialize, Serialize};

/// Stable section identifier
///
/// Renders as `product-{index}`, `experimentai` or `delivery` - the ids
/// the persisted payload and UI anchor on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SectionId {
    /// Product section by position in the edition's product list
    Product(usize),
    /// Overall box experience section
    Experimentai,
    /// Delivery experience section
    Delivery,
}

impl SectionId {
    /// Category of the questions shown in this section
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            SectionId::Product(_) => Category::Product,
            SectionId::Experimentai => Category::Experimentai,
            SectionId::Delivery => Category::Delivery,
        }
    }

    /// Product-list index, if this is a product section
    #[inline]
    #[must_use]
    pub fn product_index(&self) -> Option<usize> {
        match self {
            SectionId::Product(index) => Some(*index),
            _ => None,
        }
    }

    /// Whether this is a product section
    #[inline]
    #[must_use]
    pub fn is_product(&self) -> bool {
        matches!(self, SectionId::Product(_))
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionId::Product(index) => write!(f, "product-{index}"),
            SectionId::Experimentai => f.write_str("experimentai"),
            SectionId::Delivery => f.write_str("delivery"),
        }
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SectionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "experimentai" => Ok(SectionId::Experimentai),
            "delivery" => Ok(SectionId::Delivery),
            other => other
                .strip_prefix("product-")
                .and_then(|index| index.parse().ok())
                .map(SectionId::Product)
                .ok_or_else(|| format!("unknown section id: {other}")),
        }
    }
}

/// Section lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Not yet visited
    Pending,
    /// Currently active or previously opened without completion
    InProgress,
    /// Passed validation and acknowledged
    Completed,
}

impl SectionStatus {
    /// Whether the section counts towards progress
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SectionStatus::Completed)
    }
}

impl Default for SectionStatus {
    fn default() -> Self {
        SectionStatus::Pending
    }
}
