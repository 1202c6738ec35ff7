//! Company repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use super::base::contains_ignore_case;
use super::entities::company::{self, ActiveModel, Entity as CompanyEntity};
use crate::domain::{Company, CompanyFields, NewCompany};
use crate::errors::{AppError, AppResult, ErrorCode, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Company repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find company by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>>;

    /// Find company by EIK
    async fn find_by_eik(&self, eik: &str) -> AppResult<Option<Company>>;

    /// Check whether any company holds the given EIK
    async fn exists_by_eik(&self, eik: &str) -> AppResult<bool>;

    /// List all companies ordered by ID
    async fn list(&self) -> AppResult<Vec<Company>>;

    /// Companies whose name contains the fragment, ignoring case
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Company>>;

    /// Companies whose address contains the fragment, ignoring case
    async fn search_by_address(&self, fragment: &str) -> AppResult<Vec<Company>>;

    /// Insert a new company
    async fn insert(&self, company: NewCompany) -> AppResult<Company>;

    /// Overwrite the descriptive fields of an existing company
    async fn update(&self, id: i64, fields: CompanyFields) -> AppResult<Company>;

    /// Delete company by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed company repository
pub struct CompanyStore {
    db: DatabaseConnection,
}

impl CompanyStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_all(&self, query: Select<CompanyEntity>) -> AppResult<Vec<Company>> {
        let models = query
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Company::from).collect())
    }
}

#[async_trait]
impl CompanyRepository for CompanyStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>> {
        let result = CompanyEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Company::from))
    }

    async fn find_by_eik(&self, eik: &str) -> AppResult<Option<Company>> {
        let result = CompanyEntity::find()
            .filter(company::Column::Eik.eq(eik))
            .one(&self.db)
            .await?;

        Ok(result.map(Company::from))
    }

    async fn exists_by_eik(&self, eik: &str) -> AppResult<bool> {
        let count = CompanyEntity::find()
            .filter(company::Column::Eik.eq(eik))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn list(&self) -> AppResult<Vec<Company>> {
        self.fetch_all(CompanyEntity::find()).await
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Company>> {
        self.fetch_all(
            CompanyEntity::find().filter(contains_ignore_case(company::Column::Name, fragment)),
        )
        .await
    }

    async fn search_by_address(&self, fragment: &str) -> AppResult<Vec<Company>> {
        self.fetch_all(
            CompanyEntity::find().filter(contains_ignore_case(company::Column::Address, fragment)),
        )
        .await
    }

    async fn insert(&self, company: NewCompany) -> AppResult<Company> {
        let now = chrono::Utc::now();
        let fields = company.fields;
        let active_model = ActiveModel {
            name: Set(fields.name),
            eik: Set(fields.eik),
            address: Set(fields.address),
            email: Set(fields.email),
            phone: Set(fields.phone),
            valid_from: Set(fields.valid_from.unwrap_or_else(|| now.date_naive())),
            valid_to: Set(fields.valid_to),
            password_hash: Set(company.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Company::from(model))
    }

    async fn update(&self, id: i64, fields: CompanyFields) -> AppResult<Company> {
        let company = CompanyEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(ErrorCode::CompanyNotFound, id)?;

        let mut active: ActiveModel = company.into();
        active.name = Set(fields.name);
        active.eik = Set(fields.eik);
        active.address = Set(fields.address);
        // Absent optional values keep the stored ones
        if let Some(email) = fields.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = fields.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(valid_from) = fields.valid_from {
            active.valid_from = Set(valid_from);
        }
        if let Some(valid_to) = fields.valid_to {
            active.valid_to = Set(Some(valid_to));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Company::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = CompanyEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(ErrorCode::CompanyNotFound, id));
        }

        Ok(())
    }
}
