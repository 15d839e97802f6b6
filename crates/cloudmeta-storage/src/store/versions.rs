use sea_orm::sea_query::OnConflict;
use sea_orm::ActiveValue::Set;
use sea_orm::{EntityTrait, Order, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::version::{self, Column as VersionCol, Entity as VersionEntity};
use crate::error::{map_db_err, Result};
use crate::store::MetadataStore;

/// Schema-version bookkeeping: one row per tracked table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRow {
    pub tablename: String,
    pub version: f64,
}

impl MetadataStore {
    /// Records the schema version for a table, overwriting any prior value.
    pub async fn set_table_version(&self, tablename: &str, version: f64) -> Result<()> {
        let am = version::ActiveModel {
            tablename: Set(tablename.to_string()),
            version: Set(version),
        };
        VersionEntity::insert(am)
            .on_conflict(
                OnConflict::column(VersionCol::Tablename)
                    .update_columns([VersionCol::Version])
                    .to_owned(),
            )
            .exec(self.db())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    pub async fn get_table_version(&self, tablename: &str) -> Result<Option<f64>> {
        let model = VersionEntity::find_by_id(tablename).one(self.db()).await?;
        Ok(model.map(|m| m.version))
    }

    pub async fn list_table_versions(&self) -> Result<Vec<VersionRow>> {
        let rows = VersionEntity::find()
            .order_by(VersionCol::Tablename, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| VersionRow {
                tablename: m.tablename,
                version: m.version,
            })
            .collect())
    }
}
