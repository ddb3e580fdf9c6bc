//! # Product Editor
//!
//! The Sync Controller of the admin product-edit view: it keeps the draft in
//! step with the remote product and turns operator actions into requests,
//! toasts and navigation.
//!
//! ## Operation State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Editor Operation Lifecycle                          │
//! │                                                                         │
//! │             submit / delete / upload_image                              │
//! │   ┌──────┐ ─────────────────────────────► ┌───────────────┐             │
//! │   │ Idle │                                │ Pending(op)   │             │
//! │   └──────┘ ◄───────────────────────────── └───────┬───────┘             │
//! │      ▲      failure: toast, draft untouched        │                    │
//! │      │      upload success: image replaced         │ update/delete ok   │
//! │      │                                             ▼                    │
//! │      │                                     ┌───────────────┐            │
//! │      └── (never)                           │   Navigated   │ terminal   │
//! │                                            └───────────────┘            │
//! │                                                                         │
//! │  View unmounted while Pending → late result dropped: no draft change,   │
//! │  no toast, no navigation.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let mut editor = ProductEditor::new("P1", api, view, &config);
//! editor.mount().await;
//! editor.draft_mut().set_price("25");
//! editor.submit().await;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{ImageFile, ProductApi, UpdateOutcome};
use crate::config::AdminConfig;
use crate::notify::{Confirmation, Navigator, NotificationSink, Toast, ToastOptions};
use storefront_core::{Category, CategoryRef, FormState, ProductDraft, ProductForm, ProductRecord};

// =============================================================================
// Operator Messages
// =============================================================================

pub const UPLOAD_SUCCESS: &str = "Image uploaded successfully";
pub const UPLOAD_FAILURE: &str = "Image upload failed. Try again.";
pub const UPDATE_SUCCESS: &str = "Product successfully updated";
pub const UPDATE_FAILURE: &str = "Product update failed. Try again.";
pub const DELETE_FAILURE: &str = "Delete failed. Try again.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";
pub const UPLOAD_IMAGE_LABEL: &str = "Upload image";

fn deleted_message(name: &str) -> String {
    format!("\"{}\" is deleted", name)
}

// =============================================================================
// View Lifetime
// =============================================================================

/// Shared flag telling the editor whether its view is still on screen.
///
/// The UI shell keeps a clone and calls [`unmount`](Self::unmount) when the
/// view goes away; results arriving afterwards are discarded.
#[derive(Debug, Clone)]
pub struct ViewLifetime {
    mounted: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        ViewLifetime {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        ViewLifetime::new()
    }
}

/// The UI-side collaborators of an editor.
#[derive(Clone)]
pub struct EditorView {
    pub notifications: Arc<dyn NotificationSink>,
    pub navigator: Arc<dyn Navigator>,
    pub confirmation: Arc<dyn Confirmation>,
}

// =============================================================================
// State & Outcomes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Submit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpState {
    Idle,
    Pending(Operation),
    /// The editor has left the view; further operations are ignored.
    Navigated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The draft image now holds this reference.
    Uploaded(String),
    Failed,
    Dropped,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved, re-fetched and navigated to the listing.
    Saved,
    /// The server refused with this message.
    Rejected(String),
    Failed,
    Dropped,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted the product with this name and navigated to the listing.
    Deleted(String),
    Declined,
    Failed,
    Dropped,
    Ignored,
}

// =============================================================================
// Product Editor
// =============================================================================

/// Sync Controller for one product's edit view.
pub struct ProductEditor {
    product_id: String,
    api: Arc<dyn ProductApi>,
    view: EditorView,
    lifetime: ViewLifetime,
    listing_route: String,
    toast_options: ToastOptions,
    form: FormState,
    record: Option<ProductRecord>,
    categories: Vec<Category>,
    state: OpState,
}

impl ProductEditor {
    /// Creates an editor for `product_id`. Nothing is fetched until
    /// [`mount`](Self::mount).
    pub fn new(
        product_id: impl Into<String>,
        api: Arc<dyn ProductApi>,
        view: EditorView,
        config: &AdminConfig,
    ) -> Self {
        ProductEditor {
            product_id: product_id.into(),
            api,
            view,
            lifetime: ViewLifetime::new(),
            listing_route: config.editor.listing_route.clone(),
            toast_options: config.toast_options(),
            form: FormState::new(),
            record: None,
            categories: Vec::new(),
            state: OpState::Idle,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// A handle the view host uses to signal unmount.
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub fn state(&self) -> OpState {
        self.state
    }

    pub fn draft(&self) -> &ProductDraft {
        self.form.draft()
    }

    /// The draft for field edits (`set_name`, `set_price`, ...).
    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        self.form.draft_mut()
    }

    pub fn form_state(&self) -> &FormState {
        &self.form
    }

    /// The most recently fetched product record.
    pub fn record(&self) -> Option<&ProductRecord> {
        self.record.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Options for the category select: the product's own category first,
    /// then the fetched list without it.
    pub fn category_options(&self) -> Vec<Category> {
        let own = self
            .record
            .as_ref()
            .and_then(|record| record.category.as_ref())
            .map(|category| match category {
                CategoryRef::Expanded(category) => category.clone(),
                CategoryRef::Id(id) => self
                    .categories
                    .iter()
                    .find(|c| &c.id == id)
                    .cloned()
                    .unwrap_or_else(|| Category {
                        id: id.clone(),
                        name: String::new(),
                    }),
            });

        let mut options = Vec::with_capacity(self.categories.len() + 1);
        if let Some(own) = &own {
            options.push(own.clone());
        }
        options.extend(
            self.categories
                .iter()
                .filter(|c| own.as_ref().map_or(true, |own| own.id != c.id))
                .cloned(),
        );
        options
    }

    /// Text of the image picker: the current image reference, or
    /// `"Upload image"` when there is none.
    pub fn image_label(&self) -> &str {
        let draft = self.form.draft();
        if draft.has_image() {
            &draft.image
        } else {
            UPLOAD_IMAGE_LABEL
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Fetches the product and the category list concurrently.
    ///
    /// Either fetch may fail on its own; the failure is logged and the
    /// corresponding data stays empty.
    pub async fn mount(&mut self) {
        if self.state == OpState::Navigated {
            return;
        }
        debug!(id = %self.product_id, "Mounting product editor");

        let api = Arc::clone(&self.api);
        let (product, categories) = tokio::join!(
            api.fetch_product(&self.product_id),
            api.fetch_categories()
        );

        if !self.still_mounted("mount") {
            return;
        }

        match product {
            Ok(record) => self.apply_record(record),
            Err(e) => warn!(id = %self.product_id, error = %e, "Failed to fetch product"),
        }

        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => warn!(error = %e, "Failed to fetch categories"),
        }
    }

    /// Re-fetches the product. Seeding happens only if the id changed, so
    /// operator edits survive.
    pub async fn refetch(&mut self) {
        let result = self.api.fetch_product(&self.product_id).await;

        if !self.still_mounted("refetch") {
            return;
        }

        match result {
            Ok(record) => self.apply_record(record),
            Err(e) => warn!(id = %self.product_id, error = %e, "Failed to re-fetch product"),
        }
    }

    /// Uploads an image and points the draft at it.
    pub async fn upload_image(&mut self, file: ImageFile) -> UploadOutcome {
        if !self.begin(Operation::Upload) {
            return UploadOutcome::Ignored;
        }

        let result = self.api.upload_image(file).await;

        if !self.still_mounted("upload_image") {
            return UploadOutcome::Dropped;
        }
        self.state = OpState::Idle;

        match result {
            Ok(uploaded) => {
                info!(image = %uploaded.image, "Image uploaded");
                self.form.draft_mut().set_image(uploaded.image.clone());
                self.toast_success(UPLOAD_SUCCESS);
                UploadOutcome::Uploaded(uploaded.image)
            }
            Err(e) => {
                warn!(error = %e, "Image upload failed");
                self.toast_error(UPLOAD_FAILURE);
                UploadOutcome::Failed
            }
        }
    }

    /// Submits the draft as an update.
    ///
    /// ## Outcomes
    /// - `{"error": msg}` → `msg` shown verbatim, draft kept, no navigation
    /// - success → success toast, re-fetch, then navigate to the listing
    /// - transport / decode / payload failure → generic toast, draft kept
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.begin(Operation::Submit) {
            return SubmitOutcome::Ignored;
        }

        let form = match ProductForm::from_draft(self.form.draft()) {
            Ok(form) => form,
            Err(e) => {
                warn!(error = %e, "Draft could not be encoded");
                self.state = OpState::Idle;
                self.toast_error(UPDATE_FAILURE);
                return SubmitOutcome::Failed;
            }
        };

        let result = self.api.update_product(&self.product_id, form).await;

        if !self.still_mounted("submit") {
            return SubmitOutcome::Dropped;
        }

        match result {
            Ok(UpdateOutcome::Rejected(message)) => {
                info!(id = %self.product_id, error = %message, "Update rejected by server");
                self.state = OpState::Idle;
                self.toast_error(message.clone());
                SubmitOutcome::Rejected(message)
            }
            Ok(UpdateOutcome::Updated(_)) => {
                info!(id = %self.product_id, "Product updated");
                self.toast_success(UPDATE_SUCCESS);

                self.refetch().await;
                if !self.still_mounted("submit") {
                    return SubmitOutcome::Dropped;
                }

                self.navigate_to_listing();
                SubmitOutcome::Saved
            }
            Err(e) => {
                warn!(id = %self.product_id, error = %e, "Product update failed");
                self.state = OpState::Idle;
                self.toast_error(UPDATE_FAILURE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Deletes the product after the operator confirms.
    pub async fn delete(&mut self) -> DeleteOutcome {
        if self.state == OpState::Navigated {
            return DeleteOutcome::Ignored;
        }

        if !self.view.confirmation.confirm(DELETE_PROMPT) {
            debug!(id = %self.product_id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        if !self.begin(Operation::Delete) {
            return DeleteOutcome::Ignored;
        }

        let result = self.api.delete_product(&self.product_id).await;

        if !self.still_mounted("delete") {
            return DeleteOutcome::Dropped;
        }

        match result {
            Ok(deleted) => {
                info!(id = %self.product_id, name = %deleted.name, "Product deleted");
                self.toast_success(deleted_message(&deleted.name));
                self.navigate_to_listing();
                DeleteOutcome::Deleted(deleted.name)
            }
            Err(e) => {
                warn!(id = %self.product_id, error = %e, "Product delete failed");
                self.state = OpState::Idle;
                self.toast_error(DELETE_FAILURE);
                DeleteOutcome::Failed
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn begin(&mut self, operation: Operation) -> bool {
        if self.state == OpState::Navigated {
            debug!(?operation, "Editor already navigated away, ignoring");
            return false;
        }
        self.state = OpState::Pending(operation);
        true
    }

    fn still_mounted(&self, operation: &str) -> bool {
        let mounted = self.lifetime.is_mounted();
        if !mounted {
            debug!(id = %self.product_id, operation, "View unmounted, dropping late result");
        }
        mounted
    }

    fn apply_record(&mut self, record: ProductRecord) {
        if self.form.seed(&record) {
            debug!(id = %record.id, "Draft seeded from product");
        }
        self.record = Some(record);
    }

    fn navigate_to_listing(&mut self) {
        self.state = OpState::Navigated;
        self.view.navigator.navigate(&self.listing_route);
    }

    fn toast_success(&self, message: impl Into<String>) {
        self.view
            .notifications
            .notify(Toast::success(message, self.toast_options));
    }

    fn toast_error(&self, message: impl Into<String>) {
        self.view
            .notifications
            .notify(Toast::error(message, self.toast_options));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
