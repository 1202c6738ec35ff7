//! Company service - company management.
//!
//! Mirrors the user write pipeline with the EIK as natural key. Companies
//! may carry an optional login password.

use async_trait::async_trait;
use std::sync::Arc;

use super::uniqueness::{NaturalKey, UniquenessChecker};
use crate::domain::{Company, CompanyDraft, CompanyResponse, CreateCompany, NewCompany, Password};
use crate::errors::{AppError, AppResult, ErrorCode, OptionExt};
use crate::infra::UnitOfWork;

/// Company service trait for dependency injection.
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// Register a company, hashing its password when one is given
    async fn create_company(&self, request: CreateCompany) -> AppResult<CompanyResponse>;

    /// Get company by ID
    async fn get_company(&self, id: i64) -> AppResult<CompanyResponse>;

    /// Get company by EIK
    async fn get_company_by_eik(&self, eik: &str) -> AppResult<CompanyResponse>;

    /// List all companies
    async fn list_companies(&self) -> AppResult<Vec<CompanyResponse>>;

    /// Case-insensitive substring search on name
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<CompanyResponse>>;

    /// Case-insensitive substring search on address
    async fn search_by_address(&self, fragment: &str) -> AppResult<Vec<CompanyResponse>>;

    /// Replace the company's descriptive fields
    async fn update_company(&self, id: i64, draft: CompanyDraft) -> AppResult<CompanyResponse>;

    /// Delete company by ID
    async fn delete_company(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CompanyService using Unit of Work.
pub struct CompanyManager<U: UnitOfWork> {
    uow: Arc<U>,
    uniqueness: UniquenessChecker<U>,
}

impl<U: UnitOfWork> CompanyManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        let uniqueness = UniquenessChecker::new(uow.clone());
        Self { uow, uniqueness }
    }
}

fn to_responses(companies: Vec<Company>) -> Vec<CompanyResponse> {
    companies.into_iter().map(CompanyResponse::from).collect()
}

#[async_trait]
impl<U: UnitOfWork> CompanyService for CompanyManager<U> {
    async fn create_company(&self, request: CreateCompany) -> AppResult<CompanyResponse> {
        let (draft, password) = request.into_parts();
        let fields = draft.validate()?;
        if let Some(password) = &password {
            Password::check_length(password)?;
        }
        tracing::info!(eik = %fields.eik, "Creating company");

        self.uniqueness
            .ensure_available(NaturalKey::Eik(&fields.eik))
            .await?;

        let password_hash = password
            .as_deref()
            .map(Password::new)
            .transpose()?
            .map(Password::into_string);

        let eik = fields.eik.clone();
        let company = self
            .uow
            .companies()
            .insert(NewCompany {
                fields,
                password_hash,
            })
            .await
            .map_err(|e| NaturalKey::Eik(&eik).translate(e))?;

        tracing::info!(id = company.id, "Company created");
        Ok(company.into())
    }

    async fn get_company(&self, id: i64) -> AppResult<CompanyResponse> {
        let company = self.uow.companies().find_by_id(id).await?;
        if company.is_none() {
            tracing::warn!(id, "Company not found");
        }
        company
            .map(CompanyResponse::from)
            .ok_or_not_found(ErrorCode::CompanyNotFound, id)
    }

    async fn get_company_by_eik(&self, eik: &str) -> AppResult<CompanyResponse> {
        let company = self.uow.companies().find_by_eik(eik).await?;
        if company.is_none() {
            tracing::warn!(eik, "Company not found by EIK");
        }
        company
            .map(CompanyResponse::from)
            .ok_or_not_found(ErrorCode::CompanyEikNotFound, eik)
    }

    async fn list_companies(&self) -> AppResult<Vec<CompanyResponse>> {
        Ok(to_responses(self.uow.companies().list().await?))
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<CompanyResponse>> {
        tracing::debug!(fragment, "Searching companies by name");
        Ok(to_responses(
            self.uow.companies().search_by_name(fragment).await?,
        ))
    }

    async fn search_by_address(&self, fragment: &str) -> AppResult<Vec<CompanyResponse>> {
        tracing::debug!(fragment, "Searching companies by address");
        Ok(to_responses(
            self.uow.companies().search_by_address(fragment).await?,
        ))
    }

    async fn update_company(&self, id: i64, draft: CompanyDraft) -> AppResult<CompanyResponse> {
        let fields = draft.validate()?;
        tracing::info!(id, "Updating company");

        let companies = self.uow.companies();
        let existing = companies.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(id, "Company not found for update");
            AppError::not_found(ErrorCode::CompanyNotFound, id)
        })?;

        self.uniqueness
            .ensure_available_on_change(&existing.eik, NaturalKey::Eik(&fields.eik))
            .await?;

        let fields = fields.keep_stored(&existing);
        let eik = fields.eik.clone();
        let company = companies
            .update(id, fields)
            .await
            .map_err(|e| NaturalKey::Eik(&eik).translate(e))?;

        tracing::info!(id, "Company updated");
        Ok(company.into())
    }

    async fn delete_company(&self, id: i64) -> AppResult<()> {
        let companies = self.uow.companies();
        if companies.find_by_id(id).await?.is_none() {
            tracing::warn!(id, "Company not found for delete");
            return Err(AppError::not_found(ErrorCode::CompanyNotFound, id));
        }

        companies.delete(id).await?;
        tracing::info!(id, "Company deleted");
        Ok(())
    }
}
