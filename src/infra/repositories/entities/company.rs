//! Company database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Company;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub eik: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Date,
    pub valid_to: Option<Date>,
    pub password_hash: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Company {
    fn from(model: Model) -> Self {
        Company {
            id: model.id,
            name: model.name,
            eik: model.eik,
            address: model.address,
            email: model.email,
            phone: model.phone,
            valid_from: model.valid_from,
            valid_to: model.valid_to,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
