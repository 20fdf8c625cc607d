//! Editions and products
//!
//! One edition is one instance of the subscription box under review,
//! with its fixed product list. The catalog collaborator resolves it
//! once before a session starts; it is immutable input afterwards.

use serde::{Deserialize, Serialize};

/// Opaque product identifier (assigned by the catalog)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
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

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque edition identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(pub String);

impl EditionId {
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

impl From<&str> for EditionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product inside an edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Catalog category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Create a product with id and name only
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            category: None,
            image_url: None,
        }
    }

    /// With brand
    #[inline]
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// With catalog category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// The active edition under review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    /// Edition identifier
    pub edition_id: EditionId,
    /// Human-readable edition name (box theme)
    pub edition_name: String,
    /// Ordered product list; fixed for the life of a session
    pub products: Vec<Product>,
}

impl Edition {
    /// Create an edition
    #[inline]
    #[must_use]
    pub fn new(
        edition_id: impl Into<EditionId>,
        edition_name: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            edition_id: edition_id.into(),
            edition_name: edition_name.into(),
            products,
        }
    }
}
