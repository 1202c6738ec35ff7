//! Company domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{matches, max_chars, require, EIK_PATTERN, EMAIL_PATTERN};
use crate::config::{COMPANY_ADDRESS_MAX_LENGTH, COMPANY_NAME_MAX_LENGTH};
use crate::errors::{AppResult, ErrorCode};

/// Company domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub eik: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate company data as received from a client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    /// Company name (required, max 50 characters)
    #[schema(example = "Acme")]
    pub name: Option<String>,
    /// EIK (required, exactly 9 digits)
    #[schema(example = "123456789")]
    pub eik: Option<String>,
    /// Registered address (required, max 50 characters)
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
    /// Contact email, validated when present
    #[schema(example = "office@acme.bg")]
    pub email: Option<String>,
    /// Contact phone, must not be blank when present
    #[schema(example = "+359 2 123 4567")]
    pub phone: Option<String>,
    /// Start of validity; defaults to the creation date
    pub valid_from: Option<NaiveDate>,
    /// End of validity; open-ended when absent
    pub valid_to: Option<NaiveDate>,
}

/// Company data that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFields {
    pub name: String,
    pub eik: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

impl CompanyDraft {
    /// Check the field rules in their fixed order and stop at the first
    /// violation.
    pub fn validate(self) -> AppResult<CompanyFields> {
        let name = require(self.name, ErrorCode::CompanyNameRequired)?;
        max_chars(&name, COMPANY_NAME_MAX_LENGTH, ErrorCode::CompanyNameTooLong)?;

        let eik = require(self.eik, ErrorCode::EikRequired)?;
        matches(&eik, &EIK_PATTERN, ErrorCode::EikFormat)?;

        let address = require(self.address, ErrorCode::CompanyAddressRequired)?;
        max_chars(&address, COMPANY_ADDRESS_MAX_LENGTH, ErrorCode::CompanyAddressTooLong)?;

        let email = match self.email {
            Some(email) => {
                let email = require(Some(email), ErrorCode::CompanyEmailRequired)?;
                matches(&email, &EMAIL_PATTERN, ErrorCode::CompanyEmailInvalid)?;
                Some(email)
            }
            None => None,
        };

        let phone = match self.phone {
            Some(phone) => Some(require(Some(phone), ErrorCode::CompanyPhoneRequired)?),
            None => None,
        };

        Ok(CompanyFields {
            name,
            eik,
            address,
            email,
            phone,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        })
    }
}

impl CompanyFields {
    /// Fill optional fields the client left out with the stored values, so
    /// an update only overwrites what it carries.
    pub fn keep_stored(self, stored: &Company) -> Self {
        Self {
            email: self.email.or_else(|| stored.email.clone()),
            phone: self.phone.or_else(|| stored.phone.clone()),
            valid_from: self.valid_from.or(Some(stored.valid_from)),
            valid_to: self.valid_to.or(stored.valid_to),
            ..self
        }
    }
}

/// Data required to insert a company row.
///
/// When `fields.valid_from` is absent the store fills in the insert date.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub fields: CompanyFields,
    pub password_hash: Option<String>,
}

/// Company creation request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    #[schema(example = "Acme")]
    pub name: Option<String>,
    #[schema(example = "123456789")]
    pub eik: Option<String>,
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
    #[schema(example = "office@acme.bg")]
    pub email: Option<String>,
    #[schema(example = "+359 2 123 4567")]
    pub phone: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    /// Optional login password for the company (minimum 8 characters)
    pub password: Option<String>,
}

impl CreateCompany {
    /// Split into the candidate company and the optional plain-text password.
    pub fn into_parts(self) -> (CompanyDraft, Option<String>) {
        let draft = CompanyDraft {
            name: self.name,
            eik: self.eik,
            address: self.address,
            email: self.email,
            phone: self.phone,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        };
        (draft, self.password)
    }
}

/// Company response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Acme")]
    pub name: String,
    #[schema(example = "123456789")]
    pub eik: String,
    #[schema(example = "1 Main St")]
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            eik: company.eik,
            address: company.address,
            email: company.email,
            phone: company.phone,
            valid_from: company.valid_from,
            valid_to: company.valid_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CompanyDraft {
        CompanyDraft {
            name: Some("Acme".to_string()),
            eik: Some("123456789".to_string()),
            address: Some("1 Main St".to_string()),
            ..Default::default()
        }
    }

    fn code(draft: CompanyDraft) -> ErrorCode {
        draft.validate().unwrap_err().error_code()
    }

    #[test]
    fn test_minimal_company_is_valid() {
        let fields = draft().validate().unwrap();
        assert_eq!(fields.eik, "123456789");
        assert!(fields.email.is_none());
        assert!(fields.valid_from.is_none());
    }

    #[test]
    fn test_rule_order() {
        let all_bad = CompanyDraft {
            name: None,
            eik: Some("1".to_string()),
            address: None,
            email: Some("nope".to_string()),
            phone: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(code(all_bad), ErrorCode::CompanyNameRequired);

        let d = CompanyDraft { name: Some("n".repeat(51)), eik: None, ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyNameTooLong);

        let d = CompanyDraft { eik: None, address: None, ..draft() };
        assert_eq!(code(d), ErrorCode::EikRequired);

        let d = CompanyDraft { address: Some("  ".to_string()), ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyAddressRequired);

        let d = CompanyDraft { address: Some("a".repeat(51)), ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyAddressTooLong);
    }

    #[test]
    fn test_eik_must_be_nine_digits() {
        for eik in ["12345678", "1234567890", "12345678x", "abcdefghi"] {
            let d = CompanyDraft { eik: Some(eik.to_string()), ..draft() };
            assert_eq!(code(d), ErrorCode::EikFormat, "eik {:?}", eik);
        }
    }

    #[test]
    fn test_email_rules_apply_only_when_present() {
        let d = CompanyDraft { email: Some(" ".to_string()), ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyEmailRequired);

        let d = CompanyDraft { email: Some("office@acme".to_string()), ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyEmailInvalid);

        let d = CompanyDraft { email: Some("office@acme.bg".to_string()), ..draft() };
        assert_eq!(d.validate().unwrap().email.as_deref(), Some("office@acme.bg"));
    }

    #[test]
    fn test_phone_must_not_be_blank_when_present() {
        let d = CompanyDraft { phone: Some("".to_string()), ..draft() };
        assert_eq!(code(d), ErrorCode::CompanyPhoneRequired);

        let d = CompanyDraft { phone: Some("0888123456".to_string()), ..draft() };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_update_keeps_stored_optional_fields() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
        let stored = Company {
            id: 1,
            name: "Acme".to_string(),
            eik: "123456789".to_string(),
            address: "1 Main St".to_string(),
            email: Some("office@acme.bg".to_string()),
            phone: Some("0888123456".to_string()),
            valid_from: start,
            valid_to: Some(end),
            password_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let d = CompanyDraft { name: Some("Acme Ltd".to_string()), ..draft() };
        let merged = d.validate().unwrap().keep_stored(&stored);

        assert_eq!(merged.name, "Acme Ltd");
        assert_eq!(merged.email.as_deref(), Some("office@acme.bg"));
        assert_eq!(merged.phone.as_deref(), Some("0888123456"));
        assert_eq!(merged.valid_from, Some(start));
        assert_eq!(merged.valid_to, Some(end));

        let d = CompanyDraft { email: Some("sales@acme.bg".to_string()), ..draft() };
        let merged = d.validate().unwrap().keep_stored(&stored);
        assert_eq!(merged.email.as_deref(), Some("sales@acme.bg"));
    }
}
