//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach storage through the Unit of Work.

mod auth_service;
mod company_service;
pub mod container;
mod role_service;
mod uniqueness;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use company_service::{CompanyManager, CompanyService};
pub use role_service::{RoleManager, RoleService};
pub use uniqueness::{NaturalKey, UniquenessChecker};
pub use user_service::{UserManager, UserService};
