use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::microsoft_region_map::{self, Column as MapCol, Entity as MapEntity};
use crate::error::{map_db_err, Result};
use crate::store::MetadataStore;

/// Maps a Microsoft `(environment, region)` pair to its canonical display
/// name. All three columns form the composite identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionMapRow {
    pub environment: String,
    pub region: String,
    pub canonicalname: String,
}

fn to_row(m: microsoft_region_map::Model) -> RegionMapRow {
    RegionMapRow {
        environment: m.environment,
        region: m.region,
        canonicalname: m.canonicalname,
    }
}

impl MetadataStore {
    pub async fn insert_region_map(&self, row: RegionMapRow) -> Result<RegionMapRow> {
        let am = microsoft_region_map::ActiveModel {
            environment: Set(row.environment),
            region: Set(row.region),
            canonicalname: Set(row.canonicalname),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        Ok(to_row(model))
    }

    pub async fn get_region_map(
        &self,
        environment: &str,
        region: &str,
        canonicalname: &str,
    ) -> Result<Option<RegionMapRow>> {
        let model = MapEntity::find_by_id((
            environment.to_string(),
            region.to_string(),
            canonicalname.to_string(),
        ))
        .one(self.db())
        .await?;
        Ok(model.map(to_row))
    }

    pub async fn list_region_maps(
        &self,
        environment: Option<&str>,
    ) -> Result<Vec<RegionMapRow>> {
        let mut q = MapEntity::find();
        if let Some(e) = environment {
            q = q.filter(MapCol::Environment.eq(e));
        }
        let rows = q
            .order_by(MapCol::Region, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }

    pub async fn delete_region_map(
        &self,
        environment: &str,
        region: &str,
        canonicalname: &str,
    ) -> Result<bool> {
        let res = MapEntity::delete_by_id((
            environment.to_string(),
            region.to_string(),
            canonicalname.to_string(),
        ))
        .exec(self.db())
        .await?;
        Ok(res.rows_affected > 0)
    }
}
