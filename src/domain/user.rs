//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;
use super::validation::{ascii_digits, exact_chars, max_chars, require};
use crate::config::{EGN_LENGTH, USER_NAME_MAX_LENGTH};
use crate::errors::{AppResult, ErrorCode};

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    pub egn: String,
    pub role: Option<Role>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate user data as received from a client.
///
/// Every field is optional on the wire so that missing values are reported
/// through the field rules with their own codes instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// First name (required, max 30 characters)
    #[schema(example = "Ivan")]
    pub first_name: Option<String>,
    /// Second name (optional, max 30 characters)
    #[schema(example = "Ivanov")]
    pub second_name: Option<String>,
    /// Last name (required, max 30 characters)
    #[schema(example = "Petrov")]
    pub last_name: Option<String>,
    /// EGN (required, exactly 10 digits)
    #[schema(example = "1234567890")]
    pub egn: Option<String>,
}

/// User data that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    pub egn: String,
}

impl UserDraft {
    /// Check the field rules in their fixed order and stop at the first
    /// violation.
    pub fn validate(self) -> AppResult<UserFields> {
        let first_name = require(self.first_name, ErrorCode::FirstNameRequired)?;
        max_chars(&first_name, USER_NAME_MAX_LENGTH, ErrorCode::FirstNameTooLong)?;

        if let Some(second_name) = &self.second_name {
            max_chars(second_name, USER_NAME_MAX_LENGTH, ErrorCode::SecondNameTooLong)?;
        }

        let last_name = require(self.last_name, ErrorCode::LastNameRequired)?;
        max_chars(&last_name, USER_NAME_MAX_LENGTH, ErrorCode::LastNameTooLong)?;

        let egn = require(self.egn, ErrorCode::EgnRequired)?;
        exact_chars(&egn, EGN_LENGTH, ErrorCode::EgnLength)?;
        ascii_digits(&egn, ErrorCode::EgnNotNumeric)?;

        Ok(UserFields {
            first_name,
            second_name: self.second_name,
            last_name,
            egn,
        })
    }
}

/// Data required to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fields: UserFields,
    pub role_id: Option<i64>,
    pub password_hash: Option<String>,
}

/// Self-registration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[schema(example = "Ivan")]
    pub first_name: Option<String>,
    #[schema(example = "Ivanov")]
    pub second_name: Option<String>,
    #[schema(example = "Petrov")]
    pub last_name: Option<String>,
    #[schema(example = "1234567890")]
    pub egn: Option<String>,
    /// Password (minimum 8 characters)
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

impl RegisterUser {
    /// Split into the candidate user and the plain-text password.
    pub fn into_parts(self) -> (UserDraft, String) {
        let draft = UserDraft {
            first_name: self.first_name,
            second_name: self.second_name,
            last_name: self.last_name,
            egn: self.egn,
        };
        (draft, self.password)
    }
}

/// User response (safe to return to client).
///
/// Excludes the EGN and any credential.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ivan")]
    pub first_name: String,
    #[schema(example = "Ivanov")]
    pub second_name: Option<String>,
    #[schema(example = "Petrov")]
    pub last_name: String,
    pub role: Option<Role>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            second_name: user.second_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            first_name: Some("Ivan".to_string()),
            second_name: None,
            last_name: Some("Petrov".to_string()),
            egn: Some("1234567890".to_string()),
        }
    }

    fn code(draft: UserDraft) -> ErrorCode {
        draft.validate().unwrap_err().error_code()
    }

    #[test]
    fn test_valid_draft() {
        let fields = draft().validate().unwrap();
        assert_eq!(fields.first_name, "Ivan");
        assert_eq!(fields.egn, "1234567890");
        assert!(fields.second_name.is_none());
    }

    #[test]
    fn test_first_name_checked_before_everything() {
        let all_bad = UserDraft {
            first_name: Some("   ".to_string()),
            second_name: Some("x".repeat(31)),
            last_name: None,
            egn: Some("abc".to_string()),
        };
        assert_eq!(code(all_bad), ErrorCode::FirstNameRequired);
        assert_eq!(code(UserDraft { first_name: None, ..draft() }), ErrorCode::FirstNameRequired);
    }

    #[test]
    fn test_first_name_too_long() {
        let d = UserDraft { first_name: Some("a".repeat(31)), ..draft() };
        assert_eq!(code(d), ErrorCode::FirstNameTooLong);

        let d = UserDraft { first_name: Some("a".repeat(30)), ..draft() };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_second_name_optional_but_bounded() {
        let d = UserDraft { second_name: Some(String::new()), ..draft() };
        assert!(d.validate().is_ok());

        let d = UserDraft { second_name: Some("b".repeat(31)), last_name: None, ..draft() };
        assert_eq!(code(d), ErrorCode::SecondNameTooLong);
    }

    #[test]
    fn test_last_name_rules() {
        assert_eq!(code(UserDraft { last_name: None, ..draft() }), ErrorCode::LastNameRequired);
        let d = UserDraft { last_name: Some("c".repeat(31)), egn: None, ..draft() };
        assert_eq!(code(d), ErrorCode::LastNameTooLong);
    }

    #[test]
    fn test_egn_required() {
        assert_eq!(code(UserDraft { egn: None, ..draft() }), ErrorCode::EgnRequired);
        assert_eq!(code(UserDraft { egn: Some(" ".to_string()), ..draft() }), ErrorCode::EgnRequired);
    }

    #[test]
    fn test_egn_length_checked_regardless_of_content() {
        for egn in ["123456789", "12345678901", "abc", "abcdefghijk", "12345 6789 "] {
            let d = UserDraft { egn: Some(egn.to_string()), ..draft() };
            assert_eq!(code(d), ErrorCode::EgnLength, "egn {:?}", egn);
        }
    }

    #[test]
    fn test_egn_must_be_numeric() {
        for egn in ["12345678a0", "abcdefghij", "12345 6789", "-123456789"] {
            let d = UserDraft { egn: Some(egn.to_string()), ..draft() };
            assert_eq!(code(d), ErrorCode::EgnNotNumeric, "egn {:?}", egn);
        }
    }

    #[test]
    fn test_response_hides_egn_and_password() {
        let user = User {
            id: 7,
            first_name: "Ivan".to_string(),
            second_name: None,
            last_name: "Petrov".to_string(),
            egn: "1234567890".to_string(),
            role: None,
            password_hash: Some("$argon2id$hash".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["firstName"], "Ivan");
        assert!(json.get("egn").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_register_into_parts() {
        let request: RegisterUser = serde_json::from_value(serde_json::json!({
            "firstName": "Ivan",
            "lastName": "Petrov",
            "egn": "1234567890",
            "password": "SecurePass123!"
        }))
        .unwrap();

        let (draft, password) = request.into_parts();
        assert_eq!(draft.first_name.as_deref(), Some("Ivan"));
        assert!(draft.second_name.is_none());
        assert_eq!(password, "SecurePass123!");
    }
}
