//! HTTP request handlers.

pub mod auth_handler;
pub mod company_handler;
pub mod role_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use company_handler::company_routes;
pub use role_handler::role_routes;
pub use user_handler::user_routes;

use crate::errors::{AppError, AppResult, ErrorCode};

/// Unwrap a mandatory query parameter.
fn required_param(value: Option<String>, name: &str) -> AppResult<String> {
    value.ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidRequest,
            format!("Missing query parameter '{}'", name),
        )
    })
}
