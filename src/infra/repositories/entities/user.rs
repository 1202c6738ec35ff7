//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::role;
use crate::domain::{Role, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    #[sea_orm(unique)]
    pub egn: String,
    pub role_id: Option<i64>,
    pub password_hash: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "SetNull"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert a user row and its optional role row into the domain entity
impl From<(Model, Option<role::Model>)> for User {
    fn from((model, role): (Model, Option<role::Model>)) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            second_name: model.second_name,
            last_name: model.last_name,
            egn: model.egn,
            role: role.map(Role::from),
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
