//! Company Manager - administration backend for users, companies and roles.
//!
//! Every write goes through the same pipeline: validate the candidate
//! entity in a fixed rule order, check natural-key uniqueness (EGN for
//! users, EIK for companies), persist, and map to a response DTO that
//! never carries credentials.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, request drafts and their validation rules
//! - **services**: Application use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Error codes and HTTP error mapping
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Company, Password, Role, User};
pub use errors::{AppError, AppResult};
