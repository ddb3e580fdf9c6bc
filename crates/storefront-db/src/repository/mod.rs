//! # Repository Module
//!
//! Database repository implementations for Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().update("P1", &changes)                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self, query)                                                 │
//! │  ├── get_record(&self, id)                                              │
//! │  ├── insert(&self, product)                                             │
//! │  ├── update(&self, id, changes)                                         │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD with category expansion
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`UserRepository`](user::UserRepository) - User account CRUD

pub mod category;
pub mod product;
pub mod user;

use uuid::Uuid;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
