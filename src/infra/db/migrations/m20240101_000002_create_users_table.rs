//! Migration: Create the users table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_roles_table::Roles;
use crate::config::{EGN_LENGTH, USER_NAME_MAX_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::FirstName)
                            .string_len(USER_NAME_MAX_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::SecondName)
                            .string_len(USER_NAME_MAX_LENGTH as u32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::LastName)
                            .string_len(USER_NAME_MAX_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Egn)
                            .string_len(EGN_LENGTH as u32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::RoleId).big_integer().null())
                    .col(ColumnDef::new(Users::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_role_id")
                            .from(Users::Table, Users::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role_id")
                    .table(Users::Table)
                    .col(Users::RoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    SecondName,
    LastName,
    Egn,
    RoleId,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
