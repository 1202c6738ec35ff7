//! Natural-key uniqueness checks shared by the user and company write paths.

use std::fmt;
use std::sync::Arc;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UnitOfWork;

/// Business key that identifies at most one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalKey<'a> {
    /// User EGN
    Egn(&'a str),
    /// Company EIK
    Eik(&'a str),
}

impl NaturalKey<'_> {
    fn value(&self) -> &str {
        match self {
            NaturalKey::Egn(v) | NaturalKey::Eik(v) => v,
        }
    }

    /// Conflict error reported when the key is already taken
    pub fn conflict(&self) -> AppError {
        let code = match self {
            NaturalKey::Egn(_) => ErrorCode::UserEgnExists,
            NaturalKey::Eik(_) => ErrorCode::CompanyEikExists,
        };
        AppError::conflict(code, self.value())
    }

    /// Turn a storage-level unique violation into the same conflict the
    /// in-process check reports. Other errors pass through.
    pub fn translate(&self, err: AppError) -> AppError {
        if err.is_unique_violation() {
            tracing::error!(key = %self, "Unique constraint rejected write");
            self.conflict()
        } else {
            err
        }
    }
}

impl fmt::Display for NaturalKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaturalKey::Egn(v) => write!(f, "egn={}", v),
            NaturalKey::Eik(v) => write!(f, "eik={}", v),
        }
    }
}

/// Queries storage for existing holders of a natural key.
pub struct UniquenessChecker<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UniquenessChecker<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Fail with a conflict if any record already holds `key`.
    pub async fn ensure_available(&self, key: NaturalKey<'_>) -> AppResult<()> {
        let taken = match key {
            NaturalKey::Egn(egn) => self.uow.users().exists_by_egn(egn).await?,
            NaturalKey::Eik(eik) => self.uow.companies().exists_by_eik(eik).await?,
        };

        if taken {
            tracing::error!(key = %key, "Natural key already in use");
            return Err(key.conflict());
        }

        Ok(())
    }

    /// Same as [`ensure_available`](Self::ensure_available), but skipped
    /// entirely when the key equals the stored one.
    pub async fn ensure_available_on_change(
        &self,
        stored: &str,
        key: NaturalKey<'_>,
    ) -> AppResult<()> {
        if stored == key.value() {
            return Ok(());
        }
        self.ensure_available(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        CompanyRepository, MockCompanyRepository, MockRoleRepository, MockUserRepository,
        RoleRepository, UserRepository,
    };

    struct Repos {
        users: Arc<MockUserRepository>,
        companies: Arc<MockCompanyRepository>,
        roles: Arc<MockRoleRepository>,
    }

    impl UnitOfWork for Repos {
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

    fn checker(users: MockUserRepository, companies: MockCompanyRepository) -> UniquenessChecker<Repos> {
        UniquenessChecker::new(Arc::new(Repos {
            users: Arc::new(users),
            companies: Arc::new(companies),
            roles: Arc::new(MockRoleRepository::new()),
        }))
    }

    #[tokio::test]
    async fn test_taken_eik_conflicts() {
        let mut companies = MockCompanyRepository::new();
        companies.expect_exists_by_eik().times(1).returning(|_| Ok(true));

        let err = checker(MockUserRepository::new(), companies)
            .ensure_available(NaturalKey::Eik("123456789"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::CompanyEikExists);
    }

    #[tokio::test]
    async fn test_unchanged_key_is_not_queried() {
        let mut users = MockUserRepository::new();
        users.expect_exists_by_egn().never();

        let result = checker(users, MockCompanyRepository::new())
            .ensure_available_on_change("1234567890", NaturalKey::Egn("1234567890"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_changed_key_is_queried() {
        let mut users = MockUserRepository::new();
        users
            .expect_exists_by_egn()
            .withf(|egn| egn == "0987654321")
            .times(1)
            .returning(|_| Ok(false));

        let result = checker(users, MockCompanyRepository::new())
            .ensure_available_on_change("1234567890", NaturalKey::Egn("0987654321"))
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_conflict_codes() {
        let err = NaturalKey::Egn("1234567890").conflict();
        assert_eq!(err.error_code(), ErrorCode::UserEgnExists);
        assert_eq!(err.to_string(), "User with EGN 1234567890 already exists");

        let err = NaturalKey::Eik("123456789").conflict();
        assert_eq!(err.error_code(), ErrorCode::CompanyEikExists);
    }

    #[test]
    fn test_translate_unique_violation_into_conflict() {
        let raced = AppError::UniqueViolation("users_egn_key".to_string());
        let err = NaturalKey::Egn("1234567890").translate(raced);

        assert_eq!(err.error_code(), ErrorCode::UserEgnExists);
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);

        let raced = AppError::UniqueViolation("companies_eik_key".to_string());
        let err = NaturalKey::Eik("123456789").translate(raced);
        assert_eq!(err.error_code(), ErrorCode::CompanyEikExists);
    }

    #[test]
    fn test_translate_passes_other_errors_through() {
        let err = NaturalKey::Egn("1234567890").translate(AppError::internal("boom"));
        assert!(matches!(err, AppError::Internal(_)));
    }
}
