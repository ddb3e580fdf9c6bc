//! # Product Routes
//!
//! Create and update take a multipart form with the fields
//! `image, name, description, price, category, quantity, brand, countInStock`.
//!
//! ## Update Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PUT /api/products/{id}                                                 │
//! │                                                                         │
//! │  name, brand, description, price, quantity   required, replaced         │
//! │  category                                    absent/empty → kept        │
//! │  countInStock                                absent/empty → kept        │
//! │  image                                       absent → kept, "" → cleared│
//! │  any other field                             400 "Unknown field: x"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, info};

use storefront_core::{ProductForm, ProductRecord};
use storefront_db::{DbError, ProductQuery};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(read_product).put(update_product).delete(remove_product),
        )
}

/// Query string of `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub keyword: Option<String>,
    pub limit: Option<u32>,
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        ProductQuery {
            keyword: params.keyword,
            limit: params.limit,
        }
    }
}

/// Collects the text fields of a product form.
async fn read_form(mut multipart: Multipart) -> ApiResult<ProductForm> {
    let mut fields = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        fields.push((name, field.text().await?));
    }

    debug!(fields = fields.len(), "Product form received");
    Ok(ProductForm::from_fields(fields)?)
}

/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductRecord>>> {
    let Query(params) = params?;
    let products = state.db.products().list(&params.into()).await?;
    Ok(Json(products))
}

/// POST /api/products
async fn create_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<ProductRecord>)> {
    let product = read_form(multipart?).await?.into_new_product()?;

    let record = state.db.products().insert(&product).await?;
    info!(id = %record.id, name = %record.name, "Product created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/products/{id}
async fn read_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductRecord>> {
    let record = state
        .db
        .products()
        .get_record(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Product", &id))?;
    Ok(Json(record))
}

/// PUT /api/products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ProductRecord>> {
    let changes = read_form(multipart?).await?.into_changes()?;

    let record = state.db.products().update(&id, &changes).await?;
    info!(id = %record.id, "Product updated");
    Ok(Json(record))
}

/// DELETE /api/products/{id}
async fn remove_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductRecord>> {
    let record = state.db.products().delete(&id).await?;
    info!(id = %record.id, name = %record.name, "Product deleted");
    Ok(Json(record))
}
