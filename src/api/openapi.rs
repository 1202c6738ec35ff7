//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, company_handler, role_handler, user_handler};
use crate::domain::{CompanyDraft, CompanyResponse, CreateCompany, RegisterUser, Role, UserDraft, UserResponse};
use crate::services::LoginResponse;

/// OpenAPI documentation for the Company Manager API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Company Manager",
        version = "0.1.0",
        description = "Administration of users, companies and roles",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::get_user_by_egn,
        user_handler::search_by_first_name,
        user_handler::search_by_last_name,
        user_handler::update_user,
        user_handler::delete_user,
        // Role endpoints
        role_handler::list_roles,
        role_handler::get_role,
        role_handler::get_role_by_name,
        // Company endpoints
        company_handler::list_companies,
        company_handler::create_company,
        company_handler::get_company,
        company_handler::get_company_by_eik,
        company_handler::search_by_name,
        company_handler::search_by_address,
        company_handler::update_company,
        company_handler::delete_company,
    ),
    components(
        schemas(
            // Domain types
            Role,
            UserDraft,
            UserResponse,
            RegisterUser,
            CompanyDraft,
            CreateCompany,
            CompanyResponse,
            // Auth types
            auth_handler::LoginRequest,
            LoginResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "User administration"),
        (name = "Roles", description = "Role lookup"),
        (name = "Companies", description = "Company management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/users/login"))
                        .build(),
                ),
            );
        }
    }
}
