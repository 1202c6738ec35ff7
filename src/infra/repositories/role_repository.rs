//! Role repository implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::role::{self, Entity as RoleEntity};
use crate::domain::Role;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Role repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>>;

    /// Find role by its unique name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// List all roles ordered by ID
    async fn list(&self) -> AppResult<Vec<Role>>;
}

/// SeaORM-backed role repository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let result = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(Role::from))
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Role::from).collect())
    }
}
