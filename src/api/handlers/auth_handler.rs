//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{JsonBody, ValidatedJson};
use crate::api::AppState;
use crate::domain::{RegisterUser, UserResponse};
use crate::errors::AppResult;
use crate::services::LoginResponse;

/// Login request. Exactly one of `egn` or `eik` selects the principal;
/// the EGN wins when both are given.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User EGN
    #[schema(example = "1234567890")]
    pub egn: Option<String>,
    /// Company EIK
    #[schema(example = "123456789")]
    pub eik: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create public user routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Authentication",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "EGN already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with EGN or EIK and get a JWT token
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Neither EGN nor EIK given"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(payload.egn, payload.eik, payload.password)
        .await?;

    Ok(Json(response))
}
