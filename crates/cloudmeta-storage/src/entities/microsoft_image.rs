use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "microsoftimages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub environment: String,
    pub urn: Option<String>,
    pub state: String,
    pub replacementname: Option<String>,
    pub publishedon: Date,
    pub deprecatedon: Option<Date>,
    pub deletedon: Option<Date>,
    pub changeinfo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
