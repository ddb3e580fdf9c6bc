//! # storefront-core: Pure Catalog Logic for Storefront
//!
//! This crate holds everything the API server and the admin console agree on:
//! the record shapes that cross the wire, the money type, the editable product
//! draft, and the multipart field codec used to submit it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────────┐ │
//! │  │  storefront-admin            │ HTTP │  apps/api (axum)             │ │
//! │  │  ProductEditor ─► ProductApi │─────►│  /api/products /api/category │ │
//! │  └──────────────┬───────────────┘      └──────────────┬───────────────┘ │
//! │                 │                                     │                 │
//! │  ┌──────────────▼─────────────────────────────────────▼───────────────┐ │
//! │  │               ★ storefront-core (THIS CRATE) ★                     │ │
//! │  │                                                                    │ │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────────┐   │ │
//! │  │   │  types   │  │  money   │  │  draft   │  │ form/validation  │   │ │
//! │  │   │ Product  │  │  Money   │  │ Draft    │  │ ProductForm      │   │ │
//! │  │   │ Category │  │          │  │ SeedState│  │ field rules      │   │ │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────────┘   │ │
//! │  │                                                                    │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │ │
//! │  └────────────────────────────────────────────────────────────────────┘ │
//! │                                     │                                   │
//! │  ┌──────────────────────────────────▼─────────────────────────────────┐ │
//! │  │               storefront-db (SQLite repositories)                  │ │
//! │  └────────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain and wire types (Product, Category, User, ProductRecord)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`draft`] - The editable product draft and its one-shot seeding state
//! - [`form`] - Multipart field codec shared by client and server
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "19.99".parse().unwrap();
//! assert_eq!(price.cents(), 1999);
//! assert_eq!(price.to_decimal_string(), "19.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod form;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{FormState, ProductDraft, SeedState};
pub use error::ValidationError;
pub use form::{NewProduct, ProductChanges, ProductForm};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Route the admin console returns to after a product is saved or deleted.
pub const PRODUCT_LIST_ROUTE: &str = "/admin/allproductslist";

/// Multipart field name carrying the binary image on upload.
pub const IMAGE_UPLOAD_FIELD: &str = "image";

/// Maximum length of a product, category or user name.
pub const MAX_NAME_LENGTH: usize = 200;
