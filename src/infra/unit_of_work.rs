//! Unit of Work - single access point to every repository.
//!
//! Services depend on this trait rather than on individual stores, so a
//! test can swap the whole persistence layer with one value.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CompanyRepository, CompanyStore, RoleRepository, RoleStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get company repository
    fn companies(&self) -> Arc<dyn CompanyRepository>;

    /// Get role repository
    fn roles(&self) -> Arc<dyn RoleRepository>;
}

/// Database-backed implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    company_repo: Arc<CompanyStore>,
    role_repo: Arc<RoleStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            company_repo: Arc::new(CompanyStore::new(db.clone())),
            role_repo: Arc::new(RoleStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn companies(&self) -> Arc<dyn CompanyRepository> {
        self.company_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }
}
