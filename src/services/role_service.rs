//! Role service - read-only access to the seeded roles.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Role;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RoleService: Send + Sync {
    /// List all roles
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Get role by ID
    async fn get_role(&self, id: i64) -> AppResult<Role>;

    /// Get role by name
    async fn get_role_by_name(&self, name: &str) -> AppResult<Role>;
}

pub struct RoleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn role_not_found(key: impl std::fmt::Display) -> AppError {
    tracing::warn!(%key, "Role not found");
    AppError::NotFound {
        code: ErrorCode::ResourceNotFound,
        message: format!("Role not found: {}", key),
    }
}

#[async_trait]
impl<U: UnitOfWork> RoleService for RoleManager<U> {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.uow.roles().list().await
    }

    async fn get_role(&self, id: i64) -> AppResult<Role> {
        self.uow
            .roles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| role_not_found(id))
    }

    async fn get_role_by_name(&self, name: &str) -> AppResult<Role> {
        self.uow
            .roles()
            .find_by_name(name)
            .await?
            .ok_or_else(|| role_not_found(name))
    }
}
