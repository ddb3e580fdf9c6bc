//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Stored entities (database rows)        Wire records (HTTP JSON)        │
//! │  ┌─────────────────┐                    ┌──────────────────────────┐    │
//! │  │    Product      │ ── into_record ──► │     ProductRecord        │    │
//! │  │  price_cents    │                    │  price: Money (number)   │    │
//! │  │  category_id    │                    │  category: CategoryRef?  │    │
//! │  │  count_in_stock │                    │  countInStock            │    │
//! │  └─────────────────┘                    └──────────────────────────┘    │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │   │      User       │   (same shape on the wire)   │
//! │  │  id, name       │   │ username, email │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  Response envelopes: UploadedImage, DeletedProduct, ErrorBody           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundary Validation
//! Wire records are explicit schemas. A malformed server response fails to
//! deserialize with a typed error instead of leaking missing fields into the
//! admin console's draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category. Read-only from the product editor's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    #[serde(alias = "_id")]
    pub id: String,

    /// Display name, unique case-insensitively.
    pub name: String,
}

/// How a product record refers to its category.
///
/// The server expands the reference to `{id, name}`; older payloads carry
/// just the id. Both decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum CategoryRef {
    /// `{ "id": "...", "name": "..." }`
    Expanded(Category),
    /// `"category-id"`
    Id(String),
}

impl CategoryRef {
    /// Returns the referenced category id.
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Expanded(category) => &category.id,
            CategoryRef::Id(id) => id,
        }
    }

    /// Returns the category name when the reference is expanded.
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Expanded(category) => Some(&category.name),
            CategoryRef::Id(_) => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Long description shown on the product page.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category this product belongs to, if any.
    pub category_id: Option<String>,

    /// Pack quantity.
    pub quantity: i64,

    /// Brand name.
    pub brand: String,

    /// Reference to the stored image (e.g. `/uploads/image-1700000000.png`).
    pub image: Option<String>,

    /// Units currently in stock.
    pub count_in_stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Converts the stored row into its wire record.
    ///
    /// `category` is the resolved category row; when it is missing but the
    /// product still holds an id, the bare id is sent.
    pub fn into_record(self, category: Option<Category>) -> ProductRecord {
        let category = match (category, self.category_id) {
            (Some(category), _) => Some(CategoryRef::Expanded(category)),
            (None, Some(id)) => Some(CategoryRef::Id(id)),
            (None, None) => None,
        };

        ProductRecord {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_cents(self.price_cents),
            category,
            quantity: self.quantity,
            brand: self.brand,
            image: self.image,
            count_in_stock: self.count_in_stock,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// The product record exchanged over HTTP.
///
/// ## JSON Shape
/// ```json
/// {
///   "id": "P1",
///   "name": "Shirt",
///   "description": "Cotton shirt",
///   "price": 20,
///   "category": { "id": "c1", "name": "Apparel" },
///   "quantity": 1,
///   "brand": "Acme",
///   "image": "/uploads/image-1.png",
///   "countInStock": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    pub quantity: i64,
    pub brand: String,
    #[serde(default)]
    pub image: Option<String>,
    pub count_in_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Returns the id of the referenced category, if any.
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::id)
    }
}

// =============================================================================
// User
// =============================================================================

/// A storefront user account.
///
/// Credentials are not stored here; authentication lives outside this
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body of `PUT /api/users/{id}`. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserChanges {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Body of `POST /api/category` and `PUT /api/category/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedImage {
    #[serde(default)]
    pub message: String,
    /// Reference to the stored image, usable as the product `image` field.
    pub image: String,
}

/// The part of a delete response the admin console relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeletedProduct {
    pub name: String,
}

/// Body of every non-2xx response: `{"error": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
