//! Migration: Create the roles table and seed the built-in roles.

use sea_orm_migration::prelude::*;

use crate::config::{ROLE_ADMIN, ROLE_NAME_MAX_LENGTH, ROLE_USER};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Roles::Name)
                            .string_len(ROLE_NAME_MAX_LENGTH)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Roles::Description).text().null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::Description])
            .values_panic([ROLE_USER.into(), "Regular application user".into()])
            .values_panic([ROLE_ADMIN.into(), "Administrator".into()])
            .to_owned();

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Roles {
    Table,
    Id,
    Name,
    Description,
}
