//! User service - administrative user management.
//!
//! Write operations run the fixed pipeline: validate, look up (update
//! only), check EGN uniqueness, persist, map to the response DTO.

use async_trait::async_trait;
use std::sync::Arc;

use super::uniqueness::{NaturalKey, UniquenessChecker};
use crate::domain::{NewUser, User, UserDraft, UserResponse};
use crate::errors::{AppError, AppResult, ErrorCode, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user without credentials
    async fn create_user(&self, draft: UserDraft) -> AppResult<UserResponse>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<UserResponse>;

    /// Get user by EGN
    async fn get_user_by_egn(&self, egn: &str) -> AppResult<UserResponse>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Case-insensitive substring search on first name
    async fn search_by_first_name(&self, fragment: &str) -> AppResult<Vec<UserResponse>>;

    /// Case-insensitive substring search on last name
    async fn search_by_last_name(&self, fragment: &str) -> AppResult<Vec<UserResponse>>;

    /// Replace the user's descriptive fields
    async fn update_user(&self, id: i64, draft: UserDraft) -> AppResult<UserResponse>;

    /// Delete user by ID
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    uniqueness: UniquenessChecker<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        let uniqueness = UniquenessChecker::new(uow.clone());
        Self { uow, uniqueness }
    }
}

fn to_responses(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, draft: UserDraft) -> AppResult<UserResponse> {
        let fields = draft.validate()?;
        let key = NaturalKey::Egn(&fields.egn);
        tracing::info!(egn = %fields.egn, "Creating user");

        self.uniqueness.ensure_available(key).await?;

        let egn = fields.egn.clone();
        let user = self
            .uow
            .users()
            .insert(NewUser {
                fields,
                role_id: None,
                password_hash: None,
            })
            .await
            .map_err(|e| NaturalKey::Egn(&egn).translate(e))?;

        tracing::info!(id = user.id, "User created");
        Ok(user.into())
    }

    async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        let user = self.uow.users().find_by_id(id).await?;
        if user.is_none() {
            tracing::warn!(id, "User not found");
        }
        user.map(UserResponse::from)
            .ok_or_not_found(ErrorCode::UserNotFound, id)
    }

    async fn get_user_by_egn(&self, egn: &str) -> AppResult<UserResponse> {
        let user = self.uow.users().find_by_egn(egn).await?;
        if user.is_none() {
            tracing::warn!(egn, "User not found by EGN");
        }
        user.map(UserResponse::from)
            .ok_or_not_found(ErrorCode::UserEgnNotFound, egn)
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        Ok(to_responses(self.uow.users().list().await?))
    }

    async fn search_by_first_name(&self, fragment: &str) -> AppResult<Vec<UserResponse>> {
        tracing::debug!(fragment, "Searching users by first name");
        Ok(to_responses(
            self.uow.users().search_by_first_name(fragment).await?,
        ))
    }

    async fn search_by_last_name(&self, fragment: &str) -> AppResult<Vec<UserResponse>> {
        tracing::debug!(fragment, "Searching users by last name");
        Ok(to_responses(
            self.uow.users().search_by_last_name(fragment).await?,
        ))
    }

    async fn update_user(&self, id: i64, draft: UserDraft) -> AppResult<UserResponse> {
        let fields = draft.validate()?;
        tracing::info!(id, "Updating user");

        let users = self.uow.users();
        let existing = users.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(id, "User not found for update");
            AppError::not_found(ErrorCode::UserNotFound, id)
        })?;

        self.uniqueness
            .ensure_available_on_change(&existing.egn, NaturalKey::Egn(&fields.egn))
            .await?;

        let egn = fields.egn.clone();
        let user = users
            .update(id, fields)
            .await
            .map_err(|e| NaturalKey::Egn(&egn).translate(e))?;

        tracing::info!(id, "User updated");
        Ok(user.into())
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        let users = self.uow.users();
        if users.find_by_id(id).await?.is_none() {
            tracing::warn!(id, "User not found for delete");
            return Err(AppError::not_found(ErrorCode::UserNotFound, id));
        }

        users.delete(id).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }
}
