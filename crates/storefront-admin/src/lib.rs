//! # storefront-admin: Product Editing for the Admin Console
//!
//! The admin console's product-edit view, minus the pixels. A UI shell owns
//! the widgets and forwards operator actions to a [`ProductEditor`]; the
//! editor talks to the API server through [`ProductApi`] and answers with
//! toasts and navigation through the [`notify`] traits.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Edit Flow                                │
//! │                                                                         │
//! │  mount ─────► GET /api/products/{id}  ┐ concurrently                    │
//! │               GET /api/category/categories ┘ → seed draft once          │
//! │                                                                         │
//! │  pick image ► POST /api/upload ───────────► draft.image = reference     │
//! │                                                                         │
//! │  submit ────► PUT /api/products/{id} ──┬──► {"error"}: show message     │
//! │                                        └──► ok: toast, re-fetch,        │
//! │                                             navigate to listing         │
//! │                                                                         │
//! │  delete ────► confirm? ─► DELETE /api/products/{id} ─► toast, navigate  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`editor`] - The product editor (Sync Controller)
//! - [`api`] - The remote operations it depends on
//! - [`http`] - reqwest implementation of [`ProductApi`]
//! - [`notify`] - Toast, navigation and confirmation collaborators
//! - [`config`] - admin.toml + environment configuration
//! - [`error`] - Client and configuration errors

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod http;
pub mod notify;

#[cfg(test)]
mod mock;

pub use api::{ImageFile, ProductApi, UpdateOutcome};
pub use config::AdminConfig;
pub use editor::{
    DeleteOutcome, EditorView, OpState, Operation, ProductEditor, SubmitOutcome, UploadOutcome,
    ViewLifetime,
};
pub use error::{ClientError, ClientResult, ConfigError};
pub use http::HttpProductApi;
pub use notify::{
    Confirmation, Navigator, NotificationSink, Toast, ToastKind, ToastOptions, ToastPosition,
    TracingSink,
};
