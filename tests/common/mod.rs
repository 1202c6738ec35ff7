//! Shared test fixtures: repository mocks, an in-memory Unit of Work and
//! sample entities.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use company_manager::config::{Config, ROLE_ADMIN, ROLE_USER};
use company_manager::domain::{
    Company, CompanyFields, NewCompany, NewUser, Role, User, UserFields,
};
use company_manager::errors::{AppError, AppResult, ErrorCode};
use company_manager::infra::{
    CompanyRepository, MockCompanyRepository, MockRoleRepository, MockUserRepository,
    RoleRepository, UnitOfWork, UserRepository,
};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub fn test_config() -> Config {
    Config::new("postgres://localhost/test", TEST_SECRET).expect("valid test config")
}

// =============================================================================
// Sample entities
// =============================================================================

pub fn role(id: i64, name: &str) -> Role {
    Role {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn user(id: i64, egn: &str) -> User {
    User {
        id,
        first_name: "Ivan".to_string(),
        second_name: None,
        last_name: "Petrov".to_string(),
        egn: egn.to_string(),
        role: None,
        password_hash: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn company(id: i64, eik: &str) -> Company {
    Company {
        id,
        name: "Acme".to_string(),
        eik: eik.to_string(),
        address: "1 Main St".to_string(),
        email: None,
        phone: None,
        valid_from: Utc::now().date_naive(),
        valid_to: None,
        password_hash: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// =============================================================================
// Mocked Unit of Work
// =============================================================================

/// Unit of Work over mocked repositories. Unset repositories have no
/// expectations, so any call to them fails the test.
pub struct MockedUnitOfWork {
    users: Arc<MockUserRepository>,
    companies: Arc<MockCompanyRepository>,
    roles: Arc<MockRoleRepository>,
}

impl MockedUnitOfWork {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            companies: Arc::new(MockCompanyRepository::new()),
            roles: Arc::new(MockRoleRepository::new()),
        }
    }

    pub fn with_users(mut self, users: MockUserRepository) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_companies(mut self, companies: MockCompanyRepository) -> Self {
        self.companies = Arc::new(companies);
        self
    }

    pub fn with_roles(mut self, roles: MockRoleRepository) -> Self {
        self.roles = Arc::new(roles);
        self
    }
}

impl UnitOfWork for MockedUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn companies(&self) -> Arc<dyn CompanyRepository> {
        self.companies.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }
}

// =============================================================================
// In-memory Unit of Work
// =============================================================================

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

struct Rows<T> {
    next_id: i64,
    items: Vec<T>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Rows<T> {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Role-aware user table. Roles are fixed at construction.
pub struct InMemoryUsers {
    rows: Mutex<Rows<User>>,
    roles: Vec<Role>,
}

impl InMemoryUsers {
    fn with_role(&self, mut user: User, role_id: Option<i64>) -> User {
        user.role = role_id.and_then(|id| self.roles.iter().find(|r| r.id == id).cloned());
        user
    }

    fn filter(&self, pred: impl Fn(&User) -> bool) -> Vec<User> {
        let rows = self.rows.lock().unwrap();
        rows.items.iter().filter(|u| pred(u)).cloned().collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.filter(|u| u.id == id).pop())
    }

    async fn find_by_egn(&self, egn: &str) -> AppResult<Option<User>> {
        Ok(self.filter(|u| u.egn == egn).pop())
    }

    async fn exists_by_egn(&self, egn: &str) -> AppResult<bool> {
        Ok(!self.filter(|u| u.egn == egn).is_empty())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.filter(|_| true))
    }

    async fn search_by_first_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        Ok(self.filter(|u| contains_ignore_case(&u.first_name, fragment)))
    }

    async fn search_by_last_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        Ok(self.filter(|u| contains_ignore_case(&u.last_name, fragment)))
    }

    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.next_id();
        let now = Utc::now();
        let user = User {
            id,
            first_name: new.fields.first_name,
            second_name: new.fields.second_name,
            last_name: new.fields.last_name,
            egn: new.fields.egn,
            role: None,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        let user = self.with_role(user, new.role_id);
        rows.items.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, fields: UserFields) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .items
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, id))?;
        user.first_name = fields.first_name;
        user.second_name = fields.second_name;
        user.last_name = fields.last_name;
        user.egn = fields.egn;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.items.len();
        rows.items.retain(|u| u.id != id);
        if rows.items.len() == before {
            return Err(AppError::not_found(ErrorCode::UserNotFound, id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCompanies {
    rows: Mutex<Rows<Company>>,
}

impl InMemoryCompanies {
    fn filter(&self, pred: impl Fn(&Company) -> bool) -> Vec<Company> {
        let rows = self.rows.lock().unwrap();
        rows.items.iter().filter(|c| pred(c)).cloned().collect()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanies {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>> {
        Ok(self.filter(|c| c.id == id).pop())
    }

    async fn find_by_eik(&self, eik: &str) -> AppResult<Option<Company>> {
        Ok(self.filter(|c| c.eik == eik).pop())
    }

    async fn exists_by_eik(&self, eik: &str) -> AppResult<bool> {
        Ok(!self.filter(|c| c.eik == eik).is_empty())
    }

    async fn list(&self) -> AppResult<Vec<Company>> {
        Ok(self.filter(|_| true))
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Company>> {
        Ok(self.filter(|c| contains_ignore_case(&c.name, fragment)))
    }

    async fn search_by_address(&self, fragment: &str) -> AppResult<Vec<Company>> {
        Ok(self.filter(|c| contains_ignore_case(&c.address, fragment)))
    }

    async fn insert(&self, new: NewCompany) -> AppResult<Company> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.next_id();
        let now = Utc::now();
        let fields = new.fields;
        let company = Company {
            id,
            name: fields.name,
            eik: fields.eik,
            address: fields.address,
            email: fields.email,
            phone: fields.phone,
            valid_from: fields.valid_from.unwrap_or_else(|| now.date_naive()),
            valid_to: fields.valid_to,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        rows.items.push(company.clone());
        Ok(company)
    }

    async fn update(&self, id: i64, fields: CompanyFields) -> AppResult<Company> {
        let mut rows = self.rows.lock().unwrap();
        let company = rows
            .items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(ErrorCode::CompanyNotFound, id))?;
        company.name = fields.name;
        company.eik = fields.eik;
        company.address = fields.address;
        if fields.email.is_some() {
            company.email = fields.email;
        }
        if fields.phone.is_some() {
            company.phone = fields.phone;
        }
        if let Some(valid_from) = fields.valid_from {
            company.valid_from = valid_from;
        }
        if fields.valid_to.is_some() {
            company.valid_to = fields.valid_to;
        }
        company.updated_at = Utc::now();
        Ok(company.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.items.len();
        rows.items.retain(|c| c.id != id);
        if rows.items.len() == before {
            return Err(AppError::not_found(ErrorCode::CompanyNotFound, id));
        }
        Ok(())
    }
}

pub struct InMemoryRoles {
    roles: Vec<Role>,
}

#[async_trait]
impl RoleRepository for InMemoryRoles {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        Ok(self.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.clone())
    }
}

/// Unit of Work backed by vectors, seeded with the same roles as the
/// first migration.
pub struct InMemoryUnitOfWork {
    users: Arc<InMemoryUsers>,
    companies: Arc<InMemoryCompanies>,
    roles: Arc<InMemoryRoles>,
}

impl InMemoryUnitOfWork {
    pub fn seeded() -> Self {
        let roles = vec![role(1, ROLE_USER), role(2, ROLE_ADMIN)];
        Self {
            users: Arc::new(InMemoryUsers {
                rows: Mutex::new(Rows::default()),
                roles: roles.clone(),
            }),
            companies: Arc::new(InMemoryCompanies::default()),
            roles: Arc::new(InMemoryRoles { roles }),
        }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn companies(&self) -> Arc<dyn CompanyRepository> {
        self.companies.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }
}
