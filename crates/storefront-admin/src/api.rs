//! # Product API Boundary
//!
//! Every request the product editor makes, behind one trait. The editor only
//! sees typed records; [`HttpProductApi`](crate::http::HttpProductApi) does
//! the HTTP, tests use an in-memory double.
//!
//! | Operation          | Request                                   | Success        |
//! |--------------------|-------------------------------------------|----------------|
//! | `fetch_product`    | `GET /api/products/{id}`                  | ProductRecord  |
//! | `fetch_categories` | `GET /api/category/categories`            | Vec<Category>  |
//! | `upload_image`     | `POST /api/upload` (multipart `image`)    | UploadedImage  |
//! | `update_product`   | `PUT /api/products/{id}` (multipart form) | UpdateOutcome  |
//! | `delete_product`   | `DELETE /api/products/{id}`               | DeletedProduct |

use async_trait::async_trait;

use crate::error::ClientResult;
use storefront_core::{Category, DeletedProduct, ProductForm, ProductRecord, UploadedImage};

/// An image file picked by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        ImageFile {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// How the server answered an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The product was saved.
    Updated(ProductRecord),
    /// The server refused with `{"error": message}`.
    Rejected(String),
}

/// Remote catalog operations used by the product editor.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn fetch_product(&self, id: &str) -> ClientResult<ProductRecord>;

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;

    async fn upload_image(&self, file: ImageFile) -> ClientResult<UploadedImage>;

    /// Submits the form. A `{"error"}` body, whatever the status, is
    /// `Ok(Rejected)`; only transport and decode problems are `Err`.
    async fn update_product(&self, id: &str, form: ProductForm) -> ClientResult<UpdateOutcome>;

    async fn delete_product(&self, id: &str) -> ClientResult<DeletedProduct>;
}
