//! Authentication service - registration, login and token handling.
//!
//! Users log in with their EGN, companies with their EIK. Both receive an
//! HS256 JWT whose `kind` claim tells the principals apart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::uniqueness::{NaturalKey, UniquenessChecker};
use crate::config::{Config, PRINCIPAL_COMPANY, PRINCIPAL_USER, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::validation::is_blank;
use crate::domain::{CompanyResponse, NewUser, Password, RegisterUser, UserResponse};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User or company ID
    pub sub: i64,
    /// `user` or `company`
    pub kind: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// Present for user logins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    /// Present for company logins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyResponse>,
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with the configured default role
    async fn register(&self, request: RegisterUser) -> AppResult<UserResponse>;

    /// Login by EGN (users) or EIK (companies) and return a JWT
    async fn login(
        &self,
        egn: Option<String>,
        eik: Option<String>,
        password: String,
    ) -> AppResult<LoginResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign a token for the given principal
fn generate_token(sub: i64, kind: &str, role: String, config: &Config) -> AppResult<(String, i64)> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours());

    let claims = Claims {
        sub,
        kind: kind.to_string(),
        role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok((token, config.jwt_expiration_hours() * SECONDS_PER_HOUR))
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Verify `plain` against a stored hash, or against a dummy hash when
/// there is none so that both paths take the same time.
fn credentials_match(stored_hash: Option<&str>, plain: &str) -> bool {
    match stored_hash {
        Some(hash) => Password::from_hash(hash.to_string()).verify(plain),
        None => {
            Password::dummy().verify(plain);
            false
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(Some(v.as_str())))
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    uniqueness: UniquenessChecker<U>,
    config: Config,
    default_role: String,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance.
    ///
    /// `default_role` names the role given to every registered user.
    pub fn new(uow: Arc<U>, config: Config, default_role: impl Into<String>) -> Self {
        let uniqueness = UniquenessChecker::new(uow.clone());
        Self {
            uow,
            uniqueness,
            config,
            default_role: default_role.into(),
        }
    }

    async fn login_user(&self, egn: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self.uow.users().find_by_egn(egn).await?;
        let stored = user.as_ref().and_then(|u| u.password_hash.as_deref());

        if !credentials_match(stored, password) {
            tracing::warn!(egn, "User login rejected");
            return Err(AppError::InvalidCredentials);
        }
        let user = user.ok_or(AppError::InvalidCredentials)?;

        let role = user.role.as_ref().map(|r| r.name.clone()).unwrap_or_default();
        let (access_token, expires_in) = generate_token(user.id, PRINCIPAL_USER, role, &self.config)?;

        tracing::info!(id = user.id, "User logged in");
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user: Some(user.into()),
            company: None,
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }

    async fn login_company(&self, eik: &str, password: &str) -> AppResult<LoginResponse> {
        let company = self.uow.companies().find_by_eik(eik).await?;
        let stored = company.as_ref().and_then(|c| c.password_hash.as_deref());

        if !credentials_match(stored, password) {
            tracing::warn!(eik, "Company login rejected");
            return Err(AppError::InvalidCredentials);
        }
        let company = company.ok_or(AppError::InvalidCredentials)?;

        let (access_token, expires_in) = generate_token(
            company.id,
            PRINCIPAL_COMPANY,
            PRINCIPAL_COMPANY.to_string(),
            &self.config,
        )?;

        tracing::info!(id = company.id, "Company logged in");
        Ok(LoginResponse {
            message: "Company login successful".to_string(),
            user: None,
            company: Some(company.into()),
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, request: RegisterUser) -> AppResult<UserResponse> {
        let (draft, password) = request.into_parts();
        let fields = draft.validate()?;
        Password::check_length(&password)?;
        tracing::info!(egn = %fields.egn, "Registering user");

        self.uniqueness
            .ensure_available(NaturalKey::Egn(&fields.egn))
            .await?;

        let role = self
            .uow
            .roles()
            .find_by_name(&self.default_role)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Default role '{}' does not exist", self.default_role))
            })?;

        let password_hash = Password::new(&password)?.into_string();
        let egn = fields.egn.clone();
        let user = self
            .uow
            .users()
            .insert(NewUser {
                fields,
                role_id: Some(role.id),
                password_hash: Some(password_hash),
            })
            .await
            .map_err(|e| NaturalKey::Egn(&egn).translate(e))?;

        tracing::info!(id = user.id, "User registered");
        Ok(user.into())
    }

    async fn login(
        &self,
        egn: Option<String>,
        eik: Option<String>,
        password: String,
    ) -> AppResult<LoginResponse> {
        if let Some(egn) = non_blank(egn) {
            return self.login_user(&egn, &password).await;
        }
        if let Some(eik) = non_blank(eik) {
            return self.login_company(&eik, &password).await;
        }

        Err(AppError::bad_request(
            ErrorCode::InvalidRequest,
            "Either EGN or EIK must be provided",
        ))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
