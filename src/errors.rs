//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every client-visible
//! failure carries a stable [`ErrorCode`].

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Stable, client-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // User validation
    FirstNameTooLong,
    FirstNameRequired,
    SecondNameTooLong,
    LastNameTooLong,
    LastNameRequired,
    EgnRequired,
    EgnLength,
    EgnNotNumeric,

    // User business rules
    UserEgnExists,
    UserNotFound,
    UserEgnNotFound,

    // Company validation
    CompanyNameRequired,
    CompanyNameTooLong,
    EikRequired,
    EikFormat,
    CompanyAddressRequired,
    CompanyAddressTooLong,

    // Company business rules
    CompanyEikExists,
    CompanyNotFound,
    CompanyEikNotFound,

    // Company contact validation
    CompanyEmailRequired,
    CompanyEmailInvalid,
    CompanyPhoneRequired,

    // Credentials
    PasswordTooShort,

    // Generic
    Internal,
    InvalidRequest,
    ResourceNotFound,
    ValidationFailed,
    Unauthorized,
}

impl ErrorCode {
    /// Wire identifier, e.g. `ERR007`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FirstNameTooLong => "ERR001",
            ErrorCode::FirstNameRequired => "ERR002",
            ErrorCode::SecondNameTooLong => "ERR003",
            ErrorCode::LastNameTooLong => "ERR004",
            ErrorCode::LastNameRequired => "ERR005",
            ErrorCode::EgnRequired => "ERR006",
            ErrorCode::EgnLength => "ERR007",
            ErrorCode::EgnNotNumeric => "ERR008",
            ErrorCode::UserEgnExists => "ERR009",
            ErrorCode::UserNotFound => "ERR010",
            ErrorCode::UserEgnNotFound => "ERR011",
            ErrorCode::CompanyNameRequired => "ERR012",
            ErrorCode::CompanyNameTooLong => "ERR013",
            ErrorCode::EikRequired => "ERR014",
            ErrorCode::EikFormat => "ERR015",
            ErrorCode::CompanyAddressRequired => "ERR016",
            ErrorCode::CompanyAddressTooLong => "ERR017",
            ErrorCode::CompanyEikExists => "ERR018",
            ErrorCode::CompanyNotFound => "ERR019",
            ErrorCode::CompanyEikNotFound => "ERR020",
            ErrorCode::CompanyEmailRequired => "ERR030",
            ErrorCode::CompanyEmailInvalid => "ERR031",
            ErrorCode::CompanyPhoneRequired => "ERR032",
            ErrorCode::PasswordTooShort => "ERR033",
            ErrorCode::Internal => "ERR100",
            ErrorCode::InvalidRequest => "ERR101",
            ErrorCode::ResourceNotFound => "ERR102",
            ErrorCode::ValidationFailed => "ERR103",
            ErrorCode::Unauthorized => "ERR104",
        }
    }

    /// Message template. `{0}` is substituted by [`ErrorCode::format`].
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::FirstNameTooLong => "First name cannot exceed 30 characters",
            ErrorCode::FirstNameRequired => "First name is required",
            ErrorCode::SecondNameTooLong => "Second name cannot exceed 30 characters",
            ErrorCode::LastNameTooLong => "Last name cannot exceed 30 characters",
            ErrorCode::LastNameRequired => "Last name is required",
            ErrorCode::EgnRequired => "EGN is required",
            ErrorCode::EgnLength => "EGN must be exactly 10 digits",
            ErrorCode::EgnNotNumeric => "EGN must contain only numeric characters",
            ErrorCode::UserEgnExists => "User with EGN {0} already exists",
            ErrorCode::UserNotFound => "User not found with id: {0}",
            ErrorCode::UserEgnNotFound => "User with EGN {0} not found",
            ErrorCode::CompanyNameRequired => "Company name is required",
            ErrorCode::CompanyNameTooLong => "Company name cannot exceed 50 characters",
            ErrorCode::EikRequired => "EIK is required",
            ErrorCode::EikFormat => "EIK must be exactly 9 digits",
            ErrorCode::CompanyAddressRequired => "Company address is required",
            ErrorCode::CompanyAddressTooLong => "Company address cannot exceed 50 characters",
            ErrorCode::CompanyEikExists => "Company with EIK {0} already exists",
            ErrorCode::CompanyNotFound => "Company not found with id: {0}",
            ErrorCode::CompanyEikNotFound => "Company with EIK {0} not found",
            ErrorCode::CompanyEmailRequired => "Company email is required",
            ErrorCode::CompanyEmailInvalid => "Company email format is invalid",
            ErrorCode::CompanyPhoneRequired => "Company phone is required",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::Internal => "Internal server error",
            ErrorCode::InvalidRequest => "Invalid request data",
            ErrorCode::ResourceNotFound => "Resource not found",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::Unauthorized => "Unauthorized access",
        }
    }

    /// Render the message template with a single argument.
    pub fn format(&self, arg: impl Display) -> String {
        self.message().replace("{0}", &arg.to_string())
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    // Validation
    #[error("{}", .0.message())]
    Validation(ErrorCode),

    #[error("{message}")]
    BadRequest { code: ErrorCode, message: String },

    // External service errors
    #[error("Database error")]
    Database(#[source] DbErr),

    /// A write hit a unique constraint. Services translate this into the
    /// conflict for the key they were writing.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    /// Stable error code reported to the client
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                ErrorCode::Unauthorized
            }
            AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::BadRequest { code, .. } => *code,
            AppError::Validation(code) => *code,
            AppError::Database(_) | AppError::UniqueViolation(_) | AppError::Internal(_) => {
                ErrorCode::Internal
            }
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::UniqueViolation(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this is a storage-level unique constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, AppError::UniqueViolation(_))
    }

    fn from_db(err: DbErr, sql_err: Option<SqlErr>) -> Self {
        match sql_err {
            Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::UniqueViolation(detail),
            _ => AppError::Database(err),
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::UniqueViolation(detail) => {
                tracing::error!("Untranslated unique violation: {}", detail);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorCode::Internal.message().to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        let sql_err = err.sql_err();
        AppError::from_db(err, sql_err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().as_str(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, code: ErrorCode, key: impl Display) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, code: ErrorCode, key: impl Display) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(code, key))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(code: ErrorCode, key: impl Display) -> Self {
        AppError::NotFound {
            code,
            message: code.format(key),
        }
    }

    pub fn conflict(code: ErrorCode, key: impl Display) -> Self {
        AppError::Conflict {
            code,
            message: code.format(key),
        }
    }

    pub fn bad_request(code: ErrorCode, msg: impl Into<String>) -> Self {
        AppError::BadRequest {
            code,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_substitutes_argument() {
        assert_eq!(
            ErrorCode::UserEgnExists.format("1234567890"),
            "User with EGN 1234567890 already exists"
        );
        assert_eq!(ErrorCode::CompanyNotFound.format(7), "Company not found with id: 7");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation(ErrorCode::EgnLength).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict(ErrorCode::CompanyEikExists, "123456789").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found(ErrorCode::UserNotFound, 1).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation(ErrorCode::EgnNotNumeric).error_code().as_str(), "ERR008");
        assert_eq!(AppError::InvalidCredentials.error_code().as_str(), "ERR104");
        assert_eq!(AppError::internal("boom").error_code().as_str(), "ERR100");
    }

    #[test]
    fn test_validation_message_is_template() {
        let err = AppError::Validation(ErrorCode::FirstNameRequired);
        assert_eq!(err.to_string(), "First name is required");
    }

    #[test]
    fn test_internal_message_hidden() {
        let err = AppError::internal("connection refused on 10.0.0.5");
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        let err = missing.ok_or_not_found(ErrorCode::UserNotFound, 42).unwrap_err();
        assert_eq!(err.to_string(), "User not found with id: 42");
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_unique_constraint_error_is_classified() {
        let err = AppError::from_db(
            DbErr::Custom("insert failed".to_string()),
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"users_egn_key\"".to_string(),
            )),
        );

        assert!(err.is_unique_violation());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
    }

    #[test]
    fn test_plain_db_error_is_not_unique_violation() {
        let err = AppError::from(DbErr::Custom("other".to_string()));
        assert!(!err.is_unique_violation());
    }
}
