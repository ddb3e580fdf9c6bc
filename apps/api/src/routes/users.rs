//! User account routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use storefront_core::validation::{validate_email, validate_name};
use storefront_core::{NewUser, User, UserChanges};
use storefront_db::DbError;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(input) = payload?;
    let username = validate_name("username", &input.username)?;
    let email = validate_email(&input.email)?;

    let user = state.db.users().insert(&username, &email, input.is_admin).await?;
    info!(id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.db.users().list().await?))
}

/// GET /api/users/{id}
async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<User>> {
    let user = state
        .db
        .users()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("User", &id))?;
    Ok(Json(user))
}

/// PUT /api/users/{id}
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserChanges>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(input) = payload?;
    let changes = UserChanges {
        username: input
            .username
            .map(|name| validate_name("username", &name))
            .transpose()?,
        email: input.email.map(|email| validate_email(&email)).transpose()?,
        is_admin: input.is_admin,
    };

    let user = state.db.users().update(&id, &changes).await?;
    info!(id = %user.id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/{id}
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let user = state.db.users().delete(&id).await?;
    info!(id = %user.id, "User deleted");
    Ok(Json(json!({ "message": format!("User {} removed", user.username) })))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::test_app;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_user_lifecycle() {
        let app = test_app().await;

        let (status, user) = app
            .json(
                Method::POST,
                "/api/users",
                json!({ "username": "ada", "email": "Ada@Example.com" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["email"], "ada@example.com");
        assert_eq!(user["isAdmin"], false);
        let id = user["id"].as_str().unwrap();

        let (status, user) = app
            .json(Method::PUT, &format!("/api/users/{id}"), json!({ "isAdmin": true }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["isAdmin"], true);
        assert_eq!(user["username"], "ada");

        let (_, users) = app.get("/api/users").await;
        assert_eq!(users.as_array().unwrap().len(), 1);

        let (status, body) = app.request(Method::DELETE, &format!("/api/users/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User ada removed");

        let (status, body) = app.get(&format!("/api/users/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let app = test_app().await;
        let body = json!({ "username": "ada", "email": "ada@example.com" });

        app.json(Method::POST, "/api/users", body.clone()).await;
        let (status, err) = app.json(Method::POST, "/api/users", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "DUPLICATE");
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let app = test_app().await;

        let (status, err) = app
            .json(Method::POST, "/api/users", json!({ "username": "ada", "email": "nope" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "email has invalid format: must be a valid email address");

        let (status, err) = app.json(Method::POST, "/api/users", json!({ "email": 3 })).await;
        assert!(status.is_client_error());
        assert_eq!(err["code"], "BAD_REQUEST");
    }
}
