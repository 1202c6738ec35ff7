//! Service Container - Centralized service access.
//!
//! Handlers only see the service traits; the container decides which
//! implementations and which persistence layer back them.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CompanyManager, CompanyService, RoleManager, RoleService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get company service
    fn companies(&self) -> Arc<dyn CompanyService>;

    /// Get role service
    fn roles(&self) -> Arc<dyn RoleService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    company_service: Arc<dyn CompanyService>,
    role_service: Arc<dyn RoleService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }

    /// Wire every service onto the same Unit of Work.
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        let default_role = config.default_user_role.clone();

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config, default_role)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            company_service: Arc::new(CompanyManager::new(uow.clone())),
            role_service: Arc::new(RoleManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn companies(&self) -> Arc<dyn CompanyService> {
        self.company_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }
}
