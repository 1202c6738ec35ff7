//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{
    AuthService, CompanyService, RoleService, ServiceContainer, Services, UserService,
};

/// Connectivity probe used by the health endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl HealthProbe for Database {
    async fn ping(&self) -> AppResult<()> {
        Database::ping(self).await?;
        Ok(())
    }
}

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Company service
    pub company_service: Arc<dyn CompanyService>,
    /// Role service
    pub role_service: Arc<dyn RoleService>,
    /// Database health probe
    pub database: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Create application state from an already wired container.
    pub fn new(services: &impl ServiceContainer, database: Arc<dyn HealthProbe>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            company_service: services.companies(),
            role_service: services.roles(),
            database,
        }
    }
}
