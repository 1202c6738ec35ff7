//! Role handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::Role;
use crate::errors::AppResult;

/// Create admin role routes
pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles))
        .route("/:id", get(get_role))
        .route("/name/:name", get(get_role_by_name))
}

/// List all roles
#[utoipa::path(
    get,
    path = "/api/admin/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of roles", body = Vec<Role>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(state.role_service.list_roles().await?))
}

/// Get role by ID
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = Role),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Role>> {
    Ok(Json(state.role_service.get_role(id).await?))
}

/// Get role by name
#[utoipa::path(
    get,
    path = "/api/admin/roles/name/{name}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Role name")),
    responses(
        (status = 200, description = "Role", body = Role),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Role>> {
    Ok(Json(state.role_service.get_role_by_name(&name).await?))
}
