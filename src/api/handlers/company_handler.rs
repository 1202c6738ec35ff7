//! Company handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::required_param;
use crate::api::extractors::JsonBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CompanyDraft, CompanyResponse, CreateCompany};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
pub struct NameSearch {
    /// Fragment matched anywhere in the company name, ignoring case
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AddressSearch {
    /// Fragment matched anywhere in the address, ignoring case
    pub address: Option<String>,
}

/// Create company routes
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies))
        .route("/register", post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/eik/:eik", get(get_company_by_eik))
        .route("/search/name", get(search_by_name))
        .route("/search/address", get(search_by_address))
}

/// List all companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all companies", body = Vec<CompanyResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CompanyResponse>>> {
    Ok(Json(state.company_service.list_companies().await?))
}

/// Register a company
#[utoipa::path(
    post,
    path = "/api/companies/register",
    tag = "Companies",
    security(("bearer_auth" = [])),
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "EIK already exists")
    )
)]
pub async fn create_company(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCompany>,
) -> AppResult<(StatusCode, Json<CompanyResponse>)> {
    tracing::debug!(
        caller = caller.id,
        company = caller.is_company(),
        role = %caller.role,
        "Register company"
    );
    let company = state.company_service.create_company(request).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// Get company by ID
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CompanyResponse>> {
    Ok(Json(state.company_service.get_company(id).await?))
}

/// Get company by EIK
#[utoipa::path(
    get,
    path = "/api/companies/eik/{eik}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("eik" = String, Path, description = "Company EIK")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company_by_eik(
    State(state): State<AppState>,
    Path(eik): Path<String>,
) -> AppResult<Json<CompanyResponse>> {
    Ok(Json(state.company_service.get_company_by_eik(&eik).await?))
}

/// Search companies by name
#[utoipa::path(
    get,
    path = "/api/companies/search/name",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(NameSearch),
    responses(
        (status = 200, description = "Matching companies", body = Vec<CompanyResponse>),
        (status = 400, description = "Missing query parameter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameSearch>,
) -> AppResult<Json<Vec<CompanyResponse>>> {
    let fragment = required_param(query.name, "name")?;
    Ok(Json(state.company_service.search_by_name(&fragment).await?))
}

/// Search companies by address
#[utoipa::path(
    get,
    path = "/api/companies/search/address",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(AddressSearch),
    responses(
        (status = 200, description = "Matching companies", body = Vec<CompanyResponse>),
        (status = 400, description = "Missing query parameter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn search_by_address(
    State(state): State<AppState>,
    Query(query): Query<AddressSearch>,
) -> AppResult<Json<Vec<CompanyResponse>>> {
    let fragment = required_param(query.address, "address")?;
    Ok(Json(state.company_service.search_by_address(&fragment).await?))
}

/// Replace a company's fields
#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    request_body = CompanyDraft,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "EIK already exists")
    )
)]
pub async fn update_company(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(draft): JsonBody<CompanyDraft>,
) -> AppResult<Json<CompanyResponse>> {
    tracing::debug!(
        caller = caller.id,
        company = caller.is_company(),
        role = %caller.role,
        id,
        "Update company"
    );
    Ok(Json(state.company_service.update_company(id, draft).await?))
}

/// Delete company
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn delete_company(
    Extension(caller): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    tracing::debug!(
        caller = caller.id,
        company = caller.is_company(),
        role = %caller.role,
        id,
        "Delete company"
    );
    state.company_service.delete_company(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
