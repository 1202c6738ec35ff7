//! Migration: Create the companies table.

use sea_orm_migration::prelude::*;

use crate::config::{COMPANY_ADDRESS_MAX_LENGTH, COMPANY_NAME_MAX_LENGTH, EIK_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .string_len(COMPANY_NAME_MAX_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::Eik)
                            .string_len(EIK_LENGTH as u32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Address)
                            .string_len(COMPANY_ADDRESS_MAX_LENGTH as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Companies::Email).string().null())
                    .col(ColumnDef::new(Companies::Phone).string().null())
                    .col(ColumnDef::new(Companies::ValidFrom).date().not_null())
                    .col(ColumnDef::new(Companies::ValidTo).date().null())
                    .col(ColumnDef::new(Companies::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    Eik,
    Address,
    Email,
    Phone,
    ValidFrom,
    ValidTo,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
