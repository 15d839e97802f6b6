use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "amazonimages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // AMI id
    pub name: String,
    pub replacementid: Option<String>,
    pub region: String,
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
