//! User service tests over mocked repositories.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use mockall::predicate::eq;

use common::{user, MockedUnitOfWork};
use company_manager::domain::{NewUser, UserDraft};
use company_manager::errors::{AppError, ErrorCode};
use company_manager::infra::repositories::MockUserRepository;
use company_manager::services::{UserManager, UserService};

fn draft(egn: &str) -> UserDraft {
    UserDraft {
        first_name: Some("Ivan".to_string()),
        second_name: None,
        last_name: Some("Petrov".to_string()),
        egn: Some(egn.to_string()),
    }
}

fn service(users: MockUserRepository) -> UserManager<MockedUnitOfWork> {
    UserManager::new(Arc::new(MockedUnitOfWork::new().with_users(users)))
}

#[tokio::test]
async fn test_create_user_success() {
    let mut users = MockUserRepository::new();
    users
        .expect_exists_by_egn()
        .withf(|egn| egn == "1234567890")
        .times(1)
        .returning(|_| Ok(false));
    users.expect_insert().times(1).returning(|new: NewUser| {
        assert!(new.password_hash.is_none());
        assert!(new.role_id.is_none());
        Ok(user(1, &new.fields.egn))
    });

    let created = service(users).create_user(draft("1234567890")).await.unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.first_name, "Ivan");
}

#[tokio::test]
async fn test_create_user_with_existing_egn_writes_nothing() {
    let mut users = MockUserRepository::new();
    users.expect_exists_by_egn().returning(|_| Ok(true));
    users.expect_insert().never();

    let err = service(users)
        .create_user(draft("1234567890"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserEgnExists);
    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.to_string(), "User with EGN 1234567890 already exists");
}

#[tokio::test]
async fn test_create_user_losing_insert_race_reports_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_exists_by_egn().returning(|_| Ok(false));
    users
        .expect_insert()
        .times(1)
        .returning(|_| Err(AppError::UniqueViolation("users_egn_key".to_string())));

    let err = service(users)
        .create_user(draft("1234567890"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserEgnExists);
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_invalid_draft_touches_no_storage() {
    // No expectations: any repository call panics
    let users = MockUserRepository::new();

    let err = service(users)
        .create_user(UserDraft {
            first_name: Some("  ".to_string()),
            ..draft("12345")
        })
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::FirstNameRequired);
}

#[tokio::test]
async fn test_create_user_short_egn_reports_length() {
    let err = service(MockUserRepository::new())
        .create_user(draft("12345abc"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::EgnLength);
}

#[tokio::test]
async fn test_update_with_unchanged_egn_skips_existence_check() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(user(id, "1234567890"))));
    users.expect_exists_by_egn().never();
    users.expect_update().times(1).returning(|id, fields| {
        let mut updated = user(id, &fields.egn);
        updated.first_name = fields.first_name;
        Ok(updated)
    });

    let updated = service(users)
        .update_user(
            5,
            UserDraft {
                first_name: Some("Georgi".to_string()),
                ..draft("1234567890")
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Georgi");
}

#[tokio::test]
async fn test_update_to_taken_egn_conflicts() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id, "1234567890"))));
    users
        .expect_exists_by_egn()
        .withf(|egn| egn == "0987654321")
        .returning(|_| Ok(true));
    users.expect_update().never();

    let err = service(users)
        .update_user(5, draft("0987654321"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserEgnExists);
}

#[tokio::test]
async fn test_update_missing_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users.expect_update().never();

    let err = service(users)
        .update_user(42, draft("1234567890"))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserNotFound);
    assert_eq!(err.to_string(), "User not found with id: 42");
}

#[tokio::test]
async fn test_delete_missing_user_leaves_storage_untouched() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users.expect_delete().never();

    let err = service(users).delete_user(99).await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserNotFound);
}

#[tokio::test]
async fn test_delete_existing_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id, "1234567890"))));
    users.expect_delete().with(eq(3)).times(1).returning(|_| Ok(()));

    tokio_test::assert_ok!(service(users).delete_user(3).await);
}

#[tokio::test]
async fn test_get_by_egn_not_found_message() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_egn().returning(|_| Ok(None));

    let err = service(users)
        .get_user_by_egn("1234567890")
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::UserEgnNotFound);
    assert_eq!(err.to_string(), "User with EGN 1234567890 not found");
}

#[tokio::test]
async fn test_search_passes_fragment_through() {
    let mut users = MockUserRepository::new();
    users
        .expect_search_by_last_name()
        .withf(|fragment| fragment == "pet")
        .returning(|_| Ok(vec![user(1, "1234567890"), user(2, "1234567891")]));

    let found = service(users).search_by_last_name("pet").await.unwrap();

    assert_eq!(found.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
}
