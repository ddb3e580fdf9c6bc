//! # Product Draft
//!
//! The admin console's editable copy of a product, and the rule that decides
//! when a freshly fetched record may overwrite it.
//!
//! ## Seeding Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Draft Seeding State Machine                        │
//! │                                                                         │
//! │   FormState::new()                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────┐   seed(record P1)    ┌──────────────┐                    │
//! │   │ Unseeded │ ───────────────────► │ Seeded("P1") │◄──┐                │
//! │   └──────────┘   draft := record    └──────┬───────┘   │                │
//! │                                            │           │ seed(P1 again) │
//! │                          operator edits ───┤           │ → no-op, edits │
//! │                          set_price("25")   │           │   survive      │
//! │                                            ├───────────┘                │
//! │                                            │ seed(record P2)            │
//! │                                            ▼                            │
//! │                                     ┌──────────────┐                    │
//! │                                     │ Seeded("P2") │  draft := record   │
//! │                                     └──────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every draft field is text, the way input widgets hold it. Conversion to
//! typed values happens when the draft is turned into a
//! [`ProductForm`](crate::form::ProductForm).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ProductRecord;

// =============================================================================
// Draft
// =============================================================================

/// Field-for-field shadow of a product, as the operator is editing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    /// Selected category id; empty when none is selected.
    pub category: String,
    pub quantity: String,
    pub brand: String,
    /// Units in stock, as typed. Coerced to an integer on submit.
    pub stock: String,
    /// Image reference; empty when the product has no image.
    pub image: String,
}

impl ProductDraft {
    /// Builds a draft holding exactly the values of a fetched record.
    pub fn from_record(record: &ProductRecord) -> Self {
        ProductDraft {
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price.to_decimal_string(),
            category: record.category_id().unwrap_or_default().to_string(),
            quantity: record.quantity.to_string(),
            brand: record.brand.clone(),
            stock: record.count_in_stock.to_string(),
            image: record.image.clone().unwrap_or_default(),
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_price(&mut self, value: impl Into<String>) {
        self.price = value.into();
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
    }

    pub fn set_quantity(&mut self, value: impl Into<String>) {
        self.quantity = value.into();
    }

    pub fn set_brand(&mut self, value: impl Into<String>) {
        self.brand = value.into();
    }

    pub fn set_stock(&mut self, value: impl Into<String>) {
        self.stock = value.into();
    }

    pub fn set_image(&mut self, value: impl Into<String>) {
        self.image = value.into();
    }

    /// Returns true when a category is selected.
    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }

    /// Returns true when an image reference is present.
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

// =============================================================================
// Seed State
// =============================================================================

/// Whether the draft has been seeded, and from which product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeedState {
    /// No record has arrived yet; the draft is empty.
    #[default]
    Unseeded,
    /// The draft was seeded from the product with this id.
    Seeded(String),
}

impl SeedState {
    /// Returns the id the draft was seeded from.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            SeedState::Unseeded => None,
            SeedState::Seeded(id) => Some(id),
        }
    }
}

// =============================================================================
// Form State
// =============================================================================

/// Form State Manager: the draft plus its seeding state.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: ProductDraft,
    seed: SeedState,
}

impl FormState {
    /// Creates an empty, unseeded form.
    pub fn new() -> Self {
        FormState::default()
    }

    /// Returns the current draft.
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Returns the draft for field-level edits.
    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    /// Returns the seeding state.
    pub fn seed_state(&self) -> &SeedState {
        &self.seed
    }

    /// Seeds the draft from a fetched record.
    ///
    /// Only a record whose id differs from the current source replaces the
    /// draft; re-delivering the same product leaves operator edits alone.
    ///
    /// ## Returns
    /// `true` if the draft was overwritten.
    pub fn seed(&mut self, record: &ProductRecord) -> bool {
        if self.seed.source_id() == Some(record.id.as_str()) {
            return false;
        }

        self.draft = ProductDraft::from_record(record);
        self.seed = SeedState::Seeded(record.id.clone());
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Category, CategoryRef};

    fn record(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: "Cotton".to_string(),
            price: Money::from_major(20),
            category: None,
            quantity: 1,
            brand: "Acme".to_string(),
            image: None,
            count_in_stock: 5,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_new_form_is_empty_and_unseeded() {
        let form = FormState::new();
        assert_eq!(form.draft(), &ProductDraft::default());
        assert_eq!(form.seed_state(), &SeedState::Unseeded);
    }

    #[test]
    fn test_seed_copies_record_as_text() {
        let mut form = FormState::new();
        let mut shirt = record("P1", "Shirt");
        shirt.price = Money::from_cents(1990);
        shirt.image = Some("/uploads/shirt.png".to_string());
        shirt.category = Some(CategoryRef::Expanded(Category {
            id: "c1".to_string(),
            name: "Apparel".to_string(),
        }));

        assert!(form.seed(&shirt));
        let draft = form.draft();
        assert_eq!(draft.name, "Shirt");
        assert_eq!(draft.price, "19.90");
        assert_eq!(draft.category, "c1");
        assert_eq!(draft.stock, "5");
        assert_eq!(draft.image, "/uploads/shirt.png");
        assert_eq!(form.seed_state(), &SeedState::Seeded("P1".to_string()));
    }

    #[test]
    fn test_null_category_and_image_seed_as_empty() {
        let mut form = FormState::new();
        form.seed(&record("P1", "Shirt"));
        assert!(!form.draft().has_category());
        assert!(!form.draft().has_image());
    }

    #[test]
    fn test_reseed_with_same_id_keeps_edits() {
        let mut form = FormState::new();
        form.seed(&record("P1", "Shirt"));
        form.draft_mut().set_price("25");

        let refreshed = record("P1", "Shirt (server copy)");
        assert!(!form.seed(&refreshed));
        assert_eq!(form.draft().price, "25");
        assert_eq!(form.draft().name, "Shirt");
    }

    #[test]
    fn test_seed_with_new_id_replaces_draft() {
        let mut form = FormState::new();
        form.seed(&record("P1", "Shirt"));
        form.draft_mut().set_name("Edited");

        assert!(form.seed(&record("P2", "Hat")));
        assert_eq!(form.draft().name, "Hat");
        assert_eq!(form.seed_state().source_id(), Some("P2"));
    }

    #[test]
    fn test_setters_touch_one_field() {
        let mut draft = ProductDraft::default();
        draft.set_brand("Acme");
        draft.set_stock("7");
        assert_eq!(draft.brand, "Acme");
        assert_eq!(draft.stock, "7");
        assert_eq!(draft.name, "");
        assert_eq!(draft.price, "");
    }
}
