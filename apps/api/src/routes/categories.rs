//! Category routes.
//!
//! Names are unique case-insensitively; a clash answers
//! `400 {"error": "Already exists"}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use storefront_core::validation::validate_name;
use storefront_core::{Category, CategoryInput};
use storefront_db::DbError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const ALREADY_EXISTS: &str = "Already exists";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/category", post(create_category))
        .route("/api/category/categories", get(list_categories))
        .route(
            "/api/category/{id}",
            get(read_category).put(update_category).delete(remove_category),
        )
}

fn already_exists(err: DbError) -> ApiError {
    match err {
        DbError::UniqueViolation { .. } => {
            ApiError::new(StatusCode::BAD_REQUEST, "DUPLICATE", ALREADY_EXISTS)
        }
        other => other.into(),
    }
}

/// POST /api/category
async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;
    let name = validate_name("name", &input.name)?;

    let category = state
        .db
        .categories()
        .insert(&name)
        .await
        .map_err(already_exists)?;

    info!(id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/category/{id}
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(input) = payload?;
    let name = validate_name("name", &input.name)?;

    let category = state
        .db
        .categories()
        .rename(&id, &name)
        .await
        .map_err(already_exists)?;

    info!(id = %category.id, name = %category.name, "Category renamed");
    Ok(Json(category))
}

/// DELETE /api/category/{id}
async fn remove_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state.db.categories().delete(&id).await?;
    info!(id = %category.id, "Category deleted");
    Ok(Json(category))
}

/// GET /api/category/categories
async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

/// GET /api/category/{id}
async fn read_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state
        .db
        .categories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", &id))?;
    Ok(Json(category))
}
