//! Section plan derivation
//!
//! Given N products in edition order, the plan is N product sections
//! (`product-0..N-1`) followed by `experimentai`, then `delivery`.
//! Immutable once derived: no section is skipped, duplicated or
//! reordered for the life of the session.

use survey_domain::{Edition, Product, SectionId};

/// Label of the overall-experience section
pub const EXPERIMENTAI_LABEL: &str = "Sobre a Experimentaí";
/// Label of the delivery section
pub const DELIVERY_LABEL: &str = "Sobre a Entrega";

/// One entry of the derived plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Stable section identifier
    pub id: SectionId,
    /// Display label (product name or fixed general label)
    pub label: String,
    /// Product under review, for product sections
    pub product: Option<Product>,
}

/// Ordered, immutable section list for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlan {
    sections: Vec<SectionInfo>,
    product_count: usize,
}

impl SectionPlan {
    /// Derive the plan from the active edition
    #[must_use]
    pub fn derive(edition: &Edition) -> Self {
        let mut sections: Vec<SectionInfo> = edition
            .products
            .iter()
            .enumerate()
            .map(|(index, product)| SectionInfo {
                id: SectionId::Product(index),
                label: product.name.clone(),
                product: Some(product.clone()),
            })
            .collect();

        sections.push(SectionInfo {
            id: SectionId::Experimentai,
            label: EXPERIMENTAI_LABEL.to_string(),
            product: None,
        });
        sections.push(SectionInfo {
            id: SectionId::Delivery,
            label: DELIVERY_LABEL.to_string(),
            product: None,
        });

        Self {
            sections,
            product_count: edition.products.len(),
        }
    }

    /// Number of sections (always at least two)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Never true: the two general sections always exist
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of product sections
    #[inline]
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.product_count
    }

    /// Iterate sections in order
    pub fn iter(&self) -> impl Iterator<Item = &SectionInfo> {
        self.sections.iter()
    }

    /// Lookup by id
    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&SectionInfo> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Position of a section in the plan
    #[must_use]
    pub fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    /// First section of the plan
    #[inline]
    #[must_use]
    pub fn first(&self) -> SectionId {
        self.sections[0].id
    }

    /// Section following `id`; `None` from the terminal section
    /// (which signals submission-readiness instead)
    #[must_use]
    pub fn next_after(&self, id: SectionId) -> Option<SectionId> {
        let index = self.index_of(id)?;
        self.sections.get(index + 1).map(|section| section.id)
    }

    /// Section preceding `id`; `None` from the first section
    #[must_use]
    pub fn previous_before(&self, id: SectionId) -> Option<SectionId> {
        let index = self.index_of(id)?;
        index.checked_sub(1).map(|prev| self.sections[prev].id)
    }

    /// Whether `id` is the terminal section
    #[inline]
    #[must_use]
    pub fn is_terminal(&self, id: SectionId) -> bool {
        id == SectionId::Delivery
    }

    /// Ordered section ids
    #[must_use]
    pub fn ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|section| section.id).collect()
    }
}
