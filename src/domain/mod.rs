//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! users, companies and roles, their field rules, and the
//! password value object.

pub mod company;
pub mod password;
pub mod role;
pub mod user;
pub mod validation;

pub use company::{
    Company, CompanyDraft, CompanyFields, CompanyResponse, CreateCompany, NewCompany,
};
pub use password::Password;
pub use role::Role;
pub use user::{NewUser, RegisterUser, User, UserDraft, UserFields, UserResponse};
