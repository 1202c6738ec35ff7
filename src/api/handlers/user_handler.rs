//! Administrative user handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::required_param;
use crate::api::extractors::JsonBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{UserDraft, UserResponse};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FirstNameSearch {
    /// Fragment matched anywhere in the first name, ignoring case
    pub first_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LastNameSearch {
    /// Fragment matched anywhere in the last name, ignoring case
    pub last_name: Option<String>,
}

/// Create admin user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/egn/:egn", get(get_user_by_egn))
        .route("/search/firstname", get(search_by_first_name))
        .route("/search/lastname", get(search_by_last_name))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.user_service.list_users().await?))
}

/// Create a user without credentials
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "EGN already exists")
    )
)]
pub async fn create_user(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<UserDraft>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    tracing::debug!(
        caller = caller.id,
        kind = %caller.kind,
        role = %caller.role,
        "Admin create user"
    );
    let user = state.user_service.create_user(draft).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user(id).await?))
}

/// Get user by EGN
#[utoipa::path(
    get,
    path = "/api/admin/users/egn/{egn}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("egn" = String, Path, description = "User EGN")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_egn(
    State(state): State<AppState>,
    Path(egn): Path<String>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user_by_egn(&egn).await?))
}

/// Search users by first name
#[utoipa::path(
    get,
    path = "/api/admin/users/search/firstname",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(FirstNameSearch),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Missing query parameter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn search_by_first_name(
    State(state): State<AppState>,
    Query(query): Query<FirstNameSearch>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let fragment = required_param(query.first_name, "firstName")?;
    Ok(Json(state.user_service.search_by_first_name(&fragment).await?))
}

/// Search users by last name
#[utoipa::path(
    get,
    path = "/api/admin/users/search/lastname",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(LastNameSearch),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Missing query parameter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn search_by_last_name(
    State(state): State<AppState>,
    Query(query): Query<LastNameSearch>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let fragment = required_param(query.last_name, "lastName")?;
    Ok(Json(state.user_service.search_by_last_name(&fragment).await?))
}

/// Replace a user's fields
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserDraft,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 409, description = "EGN already exists")
    )
)]
pub async fn update_user(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(draft): JsonBody<UserDraft>,
) -> AppResult<Json<UserResponse>> {
    tracing::debug!(
        caller = caller.id,
        kind = %caller.kind,
        role = %caller.role,
        id,
        "Admin update user"
    );
    Ok(Json(state.user_service.update_user(id, draft).await?))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    tracing::debug!(
        caller = caller.id,
        kind = %caller.kind,
        role = %caller.role,
        id,
        "Admin delete user"
    );
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
