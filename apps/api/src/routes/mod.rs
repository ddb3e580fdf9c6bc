//! # Route Handlers
//!
//! One module per resource. Each exposes `router()`, merged into the app in
//! [`crate::app`].
//!
//! | Module         | Paths                                           |
//! |----------------|-------------------------------------------------|
//! | [`users`]      | `/api/users`, `/api/users/{id}`                 |
//! | [`categories`] | `/api/category`, `/api/category/categories`, `/api/category/{id}` |
//! | [`products`]   | `/api/products`, `/api/products/{id}`           |
//! | [`upload`]     | `/api/upload`                                   |

pub mod categories;
pub mod products;
pub mod upload;
pub mod users;
