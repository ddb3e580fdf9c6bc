//! # Product Form
//!
//! The multipart field codec for product create/update requests.
//!
//! The admin console builds a [`ProductForm`] from its draft and sends each
//! field as a multipart text part; the server collects the parts back into a
//! [`ProductForm`] and turns it into typed, validated input.
//!
//! ## Field Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Form Round Trip                          │
//! │                                                                         │
//! │  ProductDraft (text)                                                    │
//! │        │ from_draft: category omitted when blank,                       │
//! │        │             countInStock coerced to an integer                 │
//! │        ▼                                                                │
//! │  ProductForm [image, name, description, price, (category), quantity,    │
//! │               brand, countInStock]                                      │
//! │        │ multipart/form-data                                            │
//! │        ▼                                                                │
//! │  ProductForm::from_fields (server)                                      │
//! │        │                                                                │
//! │        ├── into_new_product() ──► NewProduct      (POST)                │
//! │        └── into_changes()     ──► ProductChanges  (PUT)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::draft::ProductDraft;
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    parse_count, parse_price, validate_id, validate_name, validate_required_text,
    ValidationResult,
};

// =============================================================================
// Field Names
// =============================================================================

pub const FIELD_IMAGE: &str = "image";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_BRAND: &str = "brand";
pub const FIELD_COUNT_IN_STOCK: &str = "countInStock";

/// Every field a product form may carry, in wire order.
pub const PRODUCT_FIELDS: [&str; 8] = [
    FIELD_IMAGE,
    FIELD_NAME,
    FIELD_DESCRIPTION,
    FIELD_PRICE,
    FIELD_CATEGORY,
    FIELD_QUANTITY,
    FIELD_BRAND,
    FIELD_COUNT_IN_STOCK,
];

// =============================================================================
// Typed Inputs
// =============================================================================

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category_id: String,
    pub quantity: i64,
    pub brand: String,
    pub image: Option<String>,
    pub count_in_stock: i64,
}

/// Validated input for updating a product.
///
/// `None` means "keep the stored value". For `image`, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category_id: Option<String>,
    pub quantity: i64,
    pub brand: String,
    pub image: Option<Option<String>>,
    pub count_in_stock: Option<i64>,
}

// =============================================================================
// Product Form
// =============================================================================

/// Ordered text fields of a product multipart payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    fields: Vec<(&'static str, String)>,
}

impl ProductForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        ProductForm::default()
    }

    /// Builds the payload the admin console submits for a draft.
    ///
    /// ## Errors
    /// `InvalidFormat` when the stock text is not an integer. Empty stock
    /// text is sent as `0`.
    pub fn from_draft(draft: &ProductDraft) -> ValidationResult<Self> {
        let count_in_stock = coerce_stock(&draft.stock)?;

        let mut form = ProductForm::new();
        form.push(FIELD_IMAGE, draft.image.clone());
        form.push(FIELD_NAME, draft.name.clone());
        form.push(FIELD_DESCRIPTION, draft.description.clone());
        form.push(FIELD_PRICE, draft.price.clone());
        if draft.has_category() {
            form.push(FIELD_CATEGORY, draft.category.trim().to_string());
        }
        form.push(FIELD_QUANTITY, draft.quantity.clone());
        form.push(FIELD_BRAND, draft.brand.clone());
        form.push(FIELD_COUNT_IN_STOCK, count_in_stock.to_string());
        Ok(form)
    }

    /// Collects received multipart fields.
    ///
    /// A repeated field keeps its last value.
    ///
    /// ## Errors
    /// `UnknownField` for a name that is not a product field.
    pub fn from_fields<I, K, V>(fields: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = ProductForm::new();
        for (name, value) in fields {
            form.set(name.as_ref(), value)?;
        }
        Ok(form)
    }

    /// Sets a field by wire name, replacing any earlier value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> ValidationResult<()> {
        let key = PRODUCT_FIELDS
            .iter()
            .copied()
            .find(|field| *field == name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;

        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
        Ok(())
    }

    fn push(&mut self, key: &'static str, value: String) {
        self.fields.push((key, value));
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true when the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates the form as a create request.
    ///
    /// Checks run in the order name, brand, description, price, category,
    /// quantity; the first failure is returned.
    pub fn into_new_product(self) -> ValidationResult<NewProduct> {
        let name = validate_name(FIELD_NAME, self.text(FIELD_NAME))?;
        let brand = validate_name(FIELD_BRAND, self.text(FIELD_BRAND))?;
        let description = validate_required_text(FIELD_DESCRIPTION, self.text(FIELD_DESCRIPTION))?;
        let price = parse_price(self.text(FIELD_PRICE))?;
        let category_id = validate_id(FIELD_CATEGORY, self.text(FIELD_CATEGORY))?;
        let quantity = parse_count(FIELD_QUANTITY, self.text(FIELD_QUANTITY))?;
        let count_in_stock = self.optional_count(FIELD_COUNT_IN_STOCK)?.unwrap_or(0);

        Ok(NewProduct {
            name,
            description,
            price,
            category_id,
            quantity,
            brand,
            image: self.image().flatten(),
            count_in_stock,
        })
    }

    /// Validates the form as an update request.
    ///
    /// Same required fields as create, except `category`: when absent the
    /// stored category is kept.
    pub fn into_changes(self) -> ValidationResult<ProductChanges> {
        let name = validate_name(FIELD_NAME, self.text(FIELD_NAME))?;
        let brand = validate_name(FIELD_BRAND, self.text(FIELD_BRAND))?;
        let description = validate_required_text(FIELD_DESCRIPTION, self.text(FIELD_DESCRIPTION))?;
        let price = parse_price(self.text(FIELD_PRICE))?;
        let category_id = match self.get(FIELD_CATEGORY) {
            Some(value) if !value.trim().is_empty() => Some(validate_id(FIELD_CATEGORY, value)?),
            _ => None,
        };
        let quantity = parse_count(FIELD_QUANTITY, self.text(FIELD_QUANTITY))?;
        let count_in_stock = self.optional_count(FIELD_COUNT_IN_STOCK)?;

        Ok(ProductChanges {
            name,
            description,
            price,
            category_id,
            quantity,
            brand,
            image: self.image(),
            count_in_stock,
        })
    }

    fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    fn optional_count(&self, name: &str) -> ValidationResult<Option<i64>> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => parse_count(name, value).map(Some),
            _ => Ok(None),
        }
    }

    /// `None` when absent, `Some(None)` when sent empty.
    fn image(&self) -> Option<Option<String>> {
        self.get(FIELD_IMAGE).map(|value| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    }
}

/// Coerces the stock text to an integer.
fn coerce_stock(text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    if let Ok(count) = text.parse::<i64>() {
        return Ok(count);
    }
    text.split_once('.')
        .filter(|(_, minor)| minor.chars().all(|c| c == '0'))
        .and_then(|(major, _)| major.parse::<i64>().ok())
        .ok_or_else(|| ValidationError::invalid(FIELD_COUNT_IN_STOCK, "must be a whole number"))
}

// =============================================================================
// Unit Tests
// =============================================================================
