//! # HTTP Product API
//!
//! [`ProductApi`] over reqwest.
//!
//! ## Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Response → Result                                 │
//! │                                                                         │
//! │  update_product:                                                        │
//! │    body is {"error": msg}      → Ok(UpdateOutcome::Rejected(msg))       │
//! │    2xx + ProductRecord         → Ok(UpdateOutcome::Updated(record))     │
//! │    non-2xx without {"error"}   → Err(ClientError::Status)               │
//! │    2xx + anything else         → Err(ClientError::Decode)               │
//! │                                                                         │
//! │  every other operation:                                                 │
//! │    2xx + expected record       → Ok(record)                             │
//! │    non-2xx                     → Err(ClientError::Status)               │
//! │    2xx + anything else         → Err(ClientError::Decode)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{ImageFile, ProductApi, UpdateOutcome};
use crate::config::AdminConfig;
use crate::error::{ClientError, ClientResult};
use storefront_core::{
    Category, DeletedProduct, ErrorBody, ProductForm, ProductRecord, UploadedImage,
    IMAGE_UPLOAD_FIELD,
};

/// reqwest-backed [`ProductApi`].
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: Url,
}

impl HttpProductApi {
    /// Builds a client from the admin configuration.
    pub fn new(config: &AdminConfig) -> ClientResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(HttpProductApi { client, base_url })
    }

    /// Returns the URL for `segments` below the base URL. Each segment is
    /// percent-encoded, so ids cannot escape their path position.
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn product_url(&self, id: &str) -> ClientResult<Url> {
        self.endpoint(&["api", "products", id])
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn fetch_product(&self, id: &str) -> ClientResult<ProductRecord> {
        let url = self.product_url(id)?;
        debug!(%url, "Fetching product");

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        let url = self.endpoint(&["api", "category", "categories"])?;
        debug!(%url, "Fetching categories");

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn upload_image(&self, file: ImageFile) -> ClientResult<UploadedImage> {
        let url = self.endpoint(&["api", "upload"])?;
        debug!(%url, file = %file.file_name, bytes = file.bytes.len(), "Uploading image");

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part(IMAGE_UPLOAD_FIELD, part);

        let response = self.client.post(url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn update_product(&self, id: &str, form: ProductForm) -> ClientResult<UpdateOutcome> {
        let url = self.product_url(id)?;
        debug!(%url, fields = form.len(), "Updating product");

        let multipart = form
            .fields()
            .fold(Form::new(), |multipart, (name, value)| {
                multipart.text(name, value.to_string())
            });

        let response = self.client.put(url).multipart(multipart).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if let Ok(rejection) = serde_json::from_slice::<ErrorBody>(&body) {
            debug!(%status, error = %rejection.error, "Update rejected");
            return Ok(UpdateOutcome::Rejected(rejection.error));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(UpdateOutcome::Updated(serde_json::from_slice(&body)?))
    }

    async fn delete_product(&self, id: &str) -> ClientResult<DeletedProduct> {
        let url = self.product_url(id)?;
        debug!(%url, "Deleting product");

        let response = self.client.delete(url).send().await?;
        read_json(response).await
    }
}

/// Decodes a 2xx body as `T`; anything else is an error.
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(serde_json::from_slice(&body)?)
}

fn status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpProductApi {
        let mut config = AdminConfig::default();
        config.api.base_url = base.to_string();
        HttpProductApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoints_resolve_below_base() {
        let local = api("http://localhost:5000");
        assert_eq!(
            local.product_url("P1").unwrap().as_str(),
            "http://localhost:5000/api/products/P1"
        );

        let nested = api("https://shop.example.com/backend/");
        assert_eq!(
            nested.endpoint(&["api", "category", "categories"]).unwrap().as_str(),
            "https://shop.example.com/backend/api/category/categories"
        );
    }

    #[test]
    fn test_ids_are_escaped() {
        let local = api("http://localhost:5000/");
        assert_eq!(
            local.product_url("../users").unwrap().as_str(),
            "http://localhost:5000/api/products/..%2Fusers"
        );
    }

    #[test]
    fn test_status_error_prefers_error_body() {
        let err = status_error(
            StatusCode::NOT_FOUND,
            br#"{"error":"Product not found: P9","code":"NOT_FOUND"}"#,
        );
        assert!(matches!(
            err,
            ClientError::Status { status: 404, ref message } if message == "Product not found: P9"
        ));

        let err = status_error(StatusCode::BAD_GATEWAY, b"upstream down\n");
        assert!(matches!(
            err,
            ClientError::Status { status: 502, ref message } if message == "upstream down"
        ));
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let mut config = AdminConfig::default();
        config.api.base_url = "mailto:ops@example.com".to_string();
        assert!(matches!(
            HttpProductApi::new(&config),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
