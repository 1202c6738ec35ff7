//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use super::base::contains_ignore_case;
use super::entities::role::Entity as RoleEntity;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserFields};
use crate::errors::{AppError, AppResult, ErrorCode, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every returned user carries its role, when one is assigned.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by EGN
    async fn find_by_egn(&self, egn: &str) -> AppResult<Option<User>>;

    /// Check whether any user holds the given EGN
    async fn exists_by_egn(&self, egn: &str) -> AppResult<bool>;

    /// List all users ordered by ID
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Users whose first name contains the fragment, ignoring case
    async fn search_by_first_name(&self, fragment: &str) -> AppResult<Vec<User>>;

    /// Users whose last name contains the fragment, ignoring case
    async fn search_by_last_name(&self, fragment: &str) -> AppResult<Vec<User>>;

    /// Insert a new user
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the descriptive fields of an existing user
    async fn update(&self, id: i64, fields: UserFields) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_all(&self, query: Select<UserEntity>) -> AppResult<Vec<User>> {
        let rows = query
            .find_also_related(RoleEntity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn fetch_one(&self, query: Select<UserEntity>) -> AppResult<Option<User>> {
        let row = query.find_also_related(RoleEntity).one(&self.db).await?;
        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.fetch_one(UserEntity::find_by_id(id)).await
    }

    async fn find_by_egn(&self, egn: &str) -> AppResult<Option<User>> {
        self.fetch_one(UserEntity::find().filter(user::Column::Egn.eq(egn)))
            .await
    }

    async fn exists_by_egn(&self, egn: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Egn.eq(egn))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.fetch_all(UserEntity::find()).await
    }

    async fn search_by_first_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        self.fetch_all(
            UserEntity::find().filter(contains_ignore_case((UserEntity, user::Column::FirstName), fragment)),
        )
        .await
    }

    async fn search_by_last_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        self.fetch_all(
            UserEntity::find().filter(contains_ignore_case((UserEntity, user::Column::LastName), fragment)),
        )
        .await
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let fields = user.fields;
        let active_model = ActiveModel {
            first_name: Set(fields.first_name),
            second_name: Set(fields.second_name),
            last_name: Set(fields.last_name),
            egn: Set(fields.egn),
            role_id: Set(user.role_id),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        self.find_by_id(model.id)
            .await?
            .ok_or_not_found(ErrorCode::UserNotFound, model.id)
    }

    async fn update(&self, id: i64, fields: UserFields) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(ErrorCode::UserNotFound, id)?;

        let mut active: ActiveModel = user.into();
        active.first_name = Set(fields.first_name);
        active.second_name = Set(fields.second_name);
        active.last_name = Set(fields.last_name);
        active.egn = Set(fields.egn);
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await?;

        self.find_by_id(id)
            .await?
            .ok_or_not_found(ErrorCode::UserNotFound, id)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(ErrorCode::UserNotFound, id));
        }

        Ok(())
    }
}
