//! In-memory [`ProductApi`] and recording view collaborators for editor tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{ImageFile, ProductApi, UpdateOutcome};
use crate::editor::EditorView;
use crate::error::{ClientError, ClientResult};
use crate::notify::{Confirmation, Navigator, NotificationSink, Toast, ToastKind};
use storefront_core::{
    Category, DeletedProduct, Money, ProductForm, ProductRecord, UploadedImage,
};

/// The "Shirt" product: price 20, stock 5, no category, no image.
pub fn shirt() -> ProductRecord {
    ProductRecord {
        id: "P1".to_string(),
        name: "Shirt".to_string(),
        description: "Plain cotton shirt".to_string(),
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

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "c1".to_string(),
            name: "Apparel".to_string(),
        },
        Category {
            id: "c2".to_string(),
            name: "Hats".to_string(),
        },
    ]
}

// =============================================================================
// Mock API
// =============================================================================

#[derive(Debug, Clone)]
enum UpdateScript {
    Accept,
    Reject(String),
    Fail,
}

type RequestHook = Box<dyn Fn() + Send + Sync>;

/// Scripted [`ProductApi`] that records what it was asked.
pub struct MockProductApi {
    product: Option<ProductRecord>,
    categories_fail: Mutex<bool>,
    update: Mutex<UpdateScript>,
    uploads_fail: Mutex<bool>,
    deletes_fail: Mutex<bool>,
    hook: Mutex<Option<RequestHook>>,
    fetches: AtomicUsize,
    deletes: AtomicUsize,
    updates: Mutex<Vec<ProductForm>>,
    uploads: Mutex<Vec<String>>,
}

impl MockProductApi {
    /// A server that knows no product.
    pub fn new() -> Self {
        MockProductApi {
            product: None,
            categories_fail: Mutex::new(false),
            update: Mutex::new(UpdateScript::Accept),
            uploads_fail: Mutex::new(false),
            deletes_fail: Mutex::new(false),
            hook: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_product(product: ProductRecord) -> Self {
        MockProductApi {
            product: Some(product),
            ..MockProductApi::new()
        }
    }

    pub fn fail_categories(&self) {
        *self.categories_fail.lock().unwrap() = true;
    }

    pub fn reject_updates(&self, message: &str) {
        *self.update.lock().unwrap() = UpdateScript::Reject(message.to_string());
    }

    pub fn accept_updates(&self) {
        *self.update.lock().unwrap() = UpdateScript::Accept;
    }

    /// Updates fail in transport.
    pub fn fail_updates(&self) {
        *self.update.lock().unwrap() = UpdateScript::Fail;
    }

    pub fn fail_uploads(&self) {
        *self.uploads_fail.lock().unwrap() = true;
    }

    pub fn fail_deletes(&self) {
        *self.deletes_fail.lock().unwrap() = true;
    }

    /// Runs `hook` while each later mutating request is in flight.
    pub fn on_request(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn last_update(&self) -> Option<ProductForm> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    fn in_flight(&self) {
        if let Some(hook) = self.hook.lock().unwrap().as_ref() {
            hook();
        }
    }

    fn not_found(&self) -> ClientError {
        ClientError::Status {
            status: 404,
            message: "Product not found".to_string(),
        }
    }
}

#[async_trait]
impl ProductApi for MockProductApi {
    async fn fetch_product(&self, _id: &str) -> ClientResult<ProductRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.product.clone().ok_or_else(|| self.not_found())
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        if *self.categories_fail.lock().unwrap() {
            return Err(ClientError::Transport("connection reset".to_string()));
        }
        Ok(categories())
    }

    async fn upload_image(&self, file: ImageFile) -> ClientResult<UploadedImage> {
        self.in_flight();
        if *self.uploads_fail.lock().unwrap() {
            return Err(ClientError::Status {
                status: 400,
                message: "Images only".to_string(),
            });
        }

        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(file.file_name);
        Ok(UploadedImage {
            message: "Image uploaded successfully".to_string(),
            image: format!("/uploads/image-{}.png", uploads.len()),
        })
    }

    async fn update_product(&self, _id: &str, form: ProductForm) -> ClientResult<UpdateOutcome> {
        self.in_flight();
        self.updates.lock().unwrap().push(form);

        let script = self.update.lock().unwrap().clone();
        match script {
            UpdateScript::Accept => {
                let product = self.product.clone().ok_or_else(|| self.not_found())?;
                Ok(UpdateOutcome::Updated(product))
            }
            UpdateScript::Reject(message) => Ok(UpdateOutcome::Rejected(message)),
            UpdateScript::Fail => Err(ClientError::Transport("connection refused".to_string())),
        }
    }

    async fn delete_product(&self, _id: &str) -> ClientResult<DeletedProduct> {
        self.in_flight();
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if *self.deletes_fail.lock().unwrap() {
            return Err(ClientError::Status {
                status: 500,
                message: String::new(),
            });
        }

        let product = self.product.as_ref().ok_or_else(|| self.not_found())?;
        Ok(DeletedProduct {
            name: product.name.clone(),
        })
    }
}

// =============================================================================
// Recording View
// =============================================================================

/// Something the editor did to the view, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Success(String),
    Error(String),
    Navigate(String),
}

/// Records toasts and navigation on one timeline and answers confirmations.
#[derive(Clone)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    accept: bool,
}

impl Recorder {
    /// A recorder that confirms every prompt.
    pub fn new() -> Self {
        Recorder {
            events: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            accept: true,
        }
    }

    /// A recorder that declines every prompt.
    pub fn declining() -> Self {
        Recorder {
            accept: false,
            ..Recorder::new()
        }
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            notifications: Arc::new(self.clone()),
            navigator: Arc::new(self.clone()),
            confirmation: Arc::new(self.clone()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Navigate(_)))
            .count()
    }
}

impl NotificationSink for Recorder {
    fn notify(&self, toast: Toast) {
        let event = match toast.kind {
            ToastKind::Success => Event::Success(toast.message),
            ToastKind::Error => Event::Error(toast.message),
        };
        self.events.lock().unwrap().push(event);
    }
}

impl Navigator for Recorder {
    fn navigate(&self, route: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Navigate(route.to_string()));
    }
}

impl Confirmation for Recorder {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.accept
    }
}
