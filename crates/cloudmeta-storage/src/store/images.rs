use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use cloudmeta_common::types::ImageState;

use crate::entities::alibaba_image::{self, Column as AlibabaCol, Entity as AlibabaEntity};
use crate::entities::amazon_image::{self, Column as AmazonCol, Entity as AmazonEntity};
use crate::entities::google_image::{self, Column as GoogleCol, Entity as GoogleEntity};
use crate::entities::microsoft_image::{self, Column as MicrosoftCol, Entity as MicrosoftEntity};
use crate::entities::oracle_image::{self, Column as OracleCol, Entity as OracleEntity};
use crate::error::{map_db_err, Result, StorageError};
use crate::store::MetadataStore;
use crate::validate::{check_image_dates, normalize_changeinfo};

const AMAZON_IMAGES: &str = "amazonimages";
const ALIBABA_IMAGES: &str = "alibabaimages";
const GOOGLE_IMAGES: &str = "googleimages";
const MICROSOFT_IMAGES: &str = "microsoftimages";
const ORACLE_IMAGES: &str = "oracleimages";

/// Lifecycle columns shared by every provider image table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLifecycle {
    pub state: ImageState,
    pub replacementname: Option<String>,
    pub publishedon: NaiveDate,
    pub deprecatedon: Option<NaiveDate>,
    pub deletedon: Option<NaiveDate>,
    pub changeinfo: Option<String>,
}

impl ImageLifecycle {
    /// Checks the date ordering and normalizes `changeinfo` for storage.
    fn validated(mut self, table: &'static str) -> Result<Self> {
        check_image_dates(table, self.publishedon, self.deprecatedon, self.deletedon)?;
        self.changeinfo = normalize_changeinfo(table, self.changeinfo);
        Ok(self)
    }

    fn apply(&mut self, update: &ImageUpdate) {
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(name) = &update.replacementname {
            self.replacementname = Some(name.clone());
        }
        if let Some(published) = update.publishedon {
            self.publishedon = published;
        }
        if let Some(deprecated) = update.deprecatedon {
            self.deprecatedon = Some(deprecated);
        }
        if let Some(deleted) = update.deletedon {
            self.deletedon = Some(deleted);
        }
        if let Some(info) = &update.changeinfo {
            self.changeinfo = Some(info.clone());
        }
    }
}

/// Requested changes to an image's lifecycle columns. Unset fields keep
/// their stored value; the merged result is re-validated as a whole, so a
/// change to any one date is checked against the other two.
#[derive(Debug, Clone, Default)]
pub struct ImageUpdate {
    pub state: Option<ImageState>,
    pub replacementname: Option<String>,
    pub publishedon: Option<NaiveDate>,
    pub deprecatedon: Option<NaiveDate>,
    pub deletedon: Option<NaiveDate>,
    pub changeinfo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmazonImageRow {
    pub id: String,
    pub name: String,
    pub region: String,
    pub replacementid: Option<String>,
    #[serde(flatten)]
    pub lifecycle: ImageLifecycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlibabaImageRow {
    pub id: String,
    pub name: String,
    pub region: String,
    pub replacementid: Option<String>,
    #[serde(flatten)]
    pub lifecycle: ImageLifecycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleImageRow {
    pub name: String,
    pub project: String,
    #[serde(flatten)]
    pub lifecycle: ImageLifecycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicrosoftImageRow {
    /// Assigned by the database on insert; the given value is ignored.
    pub id: i32,
    pub name: String,
    pub environment: String,
    pub urn: Option<String>,
    #[serde(flatten)]
    pub lifecycle: ImageLifecycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleImageRow {
    pub id: String,
    pub name: String,
    pub replacementid: Option<String>,
    #[serde(flatten)]
    pub lifecycle: ImageLifecycle,
}

fn parse_state(table: &'static str, value: &str) -> Result<ImageState> {
    value.parse().map_err(|_| StorageError::Decode {
        table,
        column: "state",
        value: value.to_string(),
    })
}

fn amazon_to_row(m: amazon_image::Model) -> Result<AmazonImageRow> {
    Ok(AmazonImageRow {
        lifecycle: ImageLifecycle {
            state: parse_state(AMAZON_IMAGES, &m.state)?,
            replacementname: m.replacementname,
            publishedon: m.publishedon,
            deprecatedon: m.deprecatedon,
            deletedon: m.deletedon,
            changeinfo: m.changeinfo,
        },
        id: m.id,
        name: m.name,
        region: m.region,
        replacementid: m.replacementid,
    })
}

fn alibaba_to_row(m: alibaba_image::Model) -> Result<AlibabaImageRow> {
    Ok(AlibabaImageRow {
        lifecycle: ImageLifecycle {
            state: parse_state(ALIBABA_IMAGES, &m.state)?,
            replacementname: m.replacementname,
            publishedon: m.publishedon,
            deprecatedon: m.deprecatedon,
            deletedon: m.deletedon,
            changeinfo: m.changeinfo,
        },
        id: m.id,
        name: m.name,
        region: m.region,
        replacementid: m.replacementid,
    })
}

fn google_to_row(m: google_image::Model) -> Result<GoogleImageRow> {
    Ok(GoogleImageRow {
        lifecycle: ImageLifecycle {
            state: parse_state(GOOGLE_IMAGES, &m.state)?,
            replacementname: m.replacementname,
            publishedon: m.publishedon,
            deprecatedon: m.deprecatedon,
            deletedon: m.deletedon,
            changeinfo: m.changeinfo,
        },
        name: m.name,
        project: m.project,
    })
}

fn microsoft_to_row(m: microsoft_image::Model) -> Result<MicrosoftImageRow> {
    Ok(MicrosoftImageRow {
        lifecycle: ImageLifecycle {
            state: parse_state(MICROSOFT_IMAGES, &m.state)?,
            replacementname: m.replacementname,
            publishedon: m.publishedon,
            deprecatedon: m.deprecatedon,
            deletedon: m.deletedon,
            changeinfo: m.changeinfo,
        },
        id: m.id,
        name: m.name,
        environment: m.environment,
        urn: m.urn,
    })
}

fn oracle_to_row(m: oracle_image::Model) -> Result<OracleImageRow> {
    Ok(OracleImageRow {
        lifecycle: ImageLifecycle {
            state: parse_state(ORACLE_IMAGES, &m.state)?,
            replacementname: m.replacementname,
            publishedon: m.publishedon,
            deprecatedon: m.deprecatedon,
            deletedon: m.deletedon,
            changeinfo: m.changeinfo,
        },
        id: m.id,
        name: m.name,
        replacementid: m.replacementid,
    })
}

impl MetadataStore {
    // ---- amazonimages ----

    pub async fn insert_amazon_image(&self, row: AmazonImageRow) -> Result<AmazonImageRow> {
        let lifecycle = row.lifecycle.validated(AMAZON_IMAGES)?;
        let am = amazon_image::ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            replacementid: Set(row.replacementid),
            region: Set(row.region),
            state: Set(lifecycle.state.to_string()),
            replacementname: Set(lifecycle.replacementname),
            publishedon: Set(lifecycle.publishedon),
            deprecatedon: Set(lifecycle.deprecatedon),
            deletedon: Set(lifecycle.deletedon),
            changeinfo: Set(lifecycle.changeinfo),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        amazon_to_row(model)
    }

    pub async fn get_amazon_image(&self, id: &str) -> Result<Option<AmazonImageRow>> {
        let model = AmazonEntity::find_by_id(id).one(self.db()).await?;
        model.map(amazon_to_row).transpose()
    }

    pub async fn list_amazon_images(
        &self,
        state: Option<ImageState>,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<AmazonImageRow>> {
        let mut q = AmazonEntity::find();
        if let Some(s) = state {
            q = q.filter(AmazonCol::State.eq(s.to_string()));
        }
        if let Some(r) = region {
            q = q.filter(AmazonCol::Region.eq(r));
        }
        let rows = q
            .order_by(AmazonCol::Name, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(amazon_to_row).collect()
    }

    pub async fn update_amazon_image(
        &self,
        id: &str,
        update: &ImageUpdate,
    ) -> Result<AmazonImageRow> {
        let model = AmazonEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "amazon image",
                id: id.to_string(),
            })?;
        let mut row = amazon_to_row(model.clone())?;
        row.lifecycle.apply(update);
        let lifecycle = row.lifecycle.validated(AMAZON_IMAGES)?;
        let mut am: amazon_image::ActiveModel = model.into();
        am.state = Set(lifecycle.state.to_string());
        am.replacementname = Set(lifecycle.replacementname);
        am.publishedon = Set(lifecycle.publishedon);
        am.deprecatedon = Set(lifecycle.deprecatedon);
        am.deletedon = Set(lifecycle.deletedon);
        am.changeinfo = Set(lifecycle.changeinfo);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        amazon_to_row(updated)
    }

    pub async fn delete_amazon_image(&self, id: &str) -> Result<bool> {
        let res = AmazonEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- alibabaimages ----

    pub async fn insert_alibaba_image(&self, row: AlibabaImageRow) -> Result<AlibabaImageRow> {
        let lifecycle = row.lifecycle.validated(ALIBABA_IMAGES)?;
        let am = alibaba_image::ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            replacementid: Set(row.replacementid),
            region: Set(row.region),
            state: Set(lifecycle.state.to_string()),
            replacementname: Set(lifecycle.replacementname),
            publishedon: Set(lifecycle.publishedon),
            deprecatedon: Set(lifecycle.deprecatedon),
            deletedon: Set(lifecycle.deletedon),
            changeinfo: Set(lifecycle.changeinfo),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        alibaba_to_row(model)
    }

    pub async fn get_alibaba_image(&self, id: &str) -> Result<Option<AlibabaImageRow>> {
        let model = AlibabaEntity::find_by_id(id).one(self.db()).await?;
        model.map(alibaba_to_row).transpose()
    }

    pub async fn list_alibaba_images(
        &self,
        state: Option<ImageState>,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<AlibabaImageRow>> {
        let mut q = AlibabaEntity::find();
        if let Some(s) = state {
            q = q.filter(AlibabaCol::State.eq(s.to_string()));
        }
        if let Some(r) = region {
            q = q.filter(AlibabaCol::Region.eq(r));
        }
        let rows = q
            .order_by(AlibabaCol::Name, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(alibaba_to_row).collect()
    }

    pub async fn update_alibaba_image(
        &self,
        id: &str,
        update: &ImageUpdate,
    ) -> Result<AlibabaImageRow> {
        let model = AlibabaEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "alibaba image",
                id: id.to_string(),
            })?;
        let mut row = alibaba_to_row(model.clone())?;
        row.lifecycle.apply(update);
        let lifecycle = row.lifecycle.validated(ALIBABA_IMAGES)?;
        let mut am: alibaba_image::ActiveModel = model.into();
        am.state = Set(lifecycle.state.to_string());
        am.replacementname = Set(lifecycle.replacementname);
        am.publishedon = Set(lifecycle.publishedon);
        am.deprecatedon = Set(lifecycle.deprecatedon);
        am.deletedon = Set(lifecycle.deletedon);
        am.changeinfo = Set(lifecycle.changeinfo);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        alibaba_to_row(updated)
    }

    pub async fn delete_alibaba_image(&self, id: &str) -> Result<bool> {
        let res = AlibabaEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- googleimages ----

    pub async fn insert_google_image(&self, row: GoogleImageRow) -> Result<GoogleImageRow> {
        let lifecycle = row.lifecycle.validated(GOOGLE_IMAGES)?;
        let am = google_image::ActiveModel {
            name: Set(row.name),
            project: Set(row.project),
            state: Set(lifecycle.state.to_string()),
            replacementname: Set(lifecycle.replacementname),
            publishedon: Set(lifecycle.publishedon),
            deprecatedon: Set(lifecycle.deprecatedon),
            deletedon: Set(lifecycle.deletedon),
            changeinfo: Set(lifecycle.changeinfo),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        google_to_row(model)
    }

    pub async fn get_google_image(&self, name: &str) -> Result<Option<GoogleImageRow>> {
        let model = GoogleEntity::find_by_id(name).one(self.db()).await?;
        model.map(google_to_row).transpose()
    }

    pub async fn list_google_images(
        &self,
        state: Option<ImageState>,
        project: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<GoogleImageRow>> {
        let mut q = GoogleEntity::find();
        if let Some(s) = state {
            q = q.filter(GoogleCol::State.eq(s.to_string()));
        }
        if let Some(p) = project {
            q = q.filter(GoogleCol::Project.eq(p));
        }
        let rows = q
            .order_by(GoogleCol::Name, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(google_to_row).collect()
    }

    pub async fn update_google_image(
        &self,
        name: &str,
        update: &ImageUpdate,
    ) -> Result<GoogleImageRow> {
        let model = GoogleEntity::find_by_id(name)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "google image",
                id: name.to_string(),
            })?;
        let mut row = google_to_row(model.clone())?;
        row.lifecycle.apply(update);
        let lifecycle = row.lifecycle.validated(GOOGLE_IMAGES)?;
        let mut am: google_image::ActiveModel = model.into();
        am.state = Set(lifecycle.state.to_string());
        am.replacementname = Set(lifecycle.replacementname);
        am.publishedon = Set(lifecycle.publishedon);
        am.deprecatedon = Set(lifecycle.deprecatedon);
        am.deletedon = Set(lifecycle.deletedon);
        am.changeinfo = Set(lifecycle.changeinfo);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        google_to_row(updated)
    }

    pub async fn delete_google_image(&self, name: &str) -> Result<bool> {
        let res = GoogleEntity::delete_by_id(name).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- microsoftimages ----

    pub async fn insert_microsoft_image(
        &self,
        row: MicrosoftImageRow,
    ) -> Result<MicrosoftImageRow> {
        let lifecycle = row.lifecycle.validated(MICROSOFT_IMAGES)?;
        let am = microsoft_image::ActiveModel {
            id: NotSet,
            name: Set(row.name),
            environment: Set(row.environment),
            urn: Set(row.urn),
            state: Set(lifecycle.state.to_string()),
            replacementname: Set(lifecycle.replacementname),
            publishedon: Set(lifecycle.publishedon),
            deprecatedon: Set(lifecycle.deprecatedon),
            deletedon: Set(lifecycle.deletedon),
            changeinfo: Set(lifecycle.changeinfo),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        microsoft_to_row(model)
    }

    pub async fn get_microsoft_image(&self, id: i32) -> Result<Option<MicrosoftImageRow>> {
        let model = MicrosoftEntity::find_by_id(id).one(self.db()).await?;
        model.map(microsoft_to_row).transpose()
    }

    pub async fn list_microsoft_images(
        &self,
        state: Option<ImageState>,
        environment: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<MicrosoftImageRow>> {
        let mut q = MicrosoftEntity::find();
        if let Some(s) = state {
            q = q.filter(MicrosoftCol::State.eq(s.to_string()));
        }
        if let Some(e) = environment {
            q = q.filter(MicrosoftCol::Environment.eq(e));
        }
        let rows = q
            .order_by(MicrosoftCol::Name, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(microsoft_to_row).collect()
    }

    pub async fn update_microsoft_image(
        &self,
        id: i32,
        update: &ImageUpdate,
    ) -> Result<MicrosoftImageRow> {
        let model = MicrosoftEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "microsoft image",
                id: id.to_string(),
            })?;
        let mut row = microsoft_to_row(model.clone())?;
        row.lifecycle.apply(update);
        let lifecycle = row.lifecycle.validated(MICROSOFT_IMAGES)?;
        let mut am: microsoft_image::ActiveModel = model.into();
        am.state = Set(lifecycle.state.to_string());
        am.replacementname = Set(lifecycle.replacementname);
        am.publishedon = Set(lifecycle.publishedon);
        am.deprecatedon = Set(lifecycle.deprecatedon);
        am.deletedon = Set(lifecycle.deletedon);
        am.changeinfo = Set(lifecycle.changeinfo);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        microsoft_to_row(updated)
    }

    pub async fn delete_microsoft_image(&self, id: i32) -> Result<bool> {
        let res = MicrosoftEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- oracleimages ----

    pub async fn insert_oracle_image(&self, row: OracleImageRow) -> Result<OracleImageRow> {
        let lifecycle = row.lifecycle.validated(ORACLE_IMAGES)?;
        let am = oracle_image::ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            replacementid: Set(row.replacementid),
            state: Set(lifecycle.state.to_string()),
            replacementname: Set(lifecycle.replacementname),
            publishedon: Set(lifecycle.publishedon),
            deprecatedon: Set(lifecycle.deprecatedon),
            deletedon: Set(lifecycle.deletedon),
            changeinfo: Set(lifecycle.changeinfo),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        oracle_to_row(model)
    }

    pub async fn get_oracle_image(&self, id: &str) -> Result<Option<OracleImageRow>> {
        let model = OracleEntity::find_by_id(id).one(self.db()).await?;
        model.map(oracle_to_row).transpose()
    }

    pub async fn list_oracle_images(
        &self,
        state: Option<ImageState>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<OracleImageRow>> {
        let mut q = OracleEntity::find();
        if let Some(s) = state {
            q = q.filter(OracleCol::State.eq(s.to_string()));
        }
        let rows = q
            .order_by(OracleCol::Name, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(oracle_to_row).collect()
    }

    pub async fn update_oracle_image(
        &self,
        id: &str,
        update: &ImageUpdate,
    ) -> Result<OracleImageRow> {
        let model = OracleEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "oracle image",
                id: id.to_string(),
            })?;
        let mut row = oracle_to_row(model.clone())?;
        row.lifecycle.apply(update);
        let lifecycle = row.lifecycle.validated(ORACLE_IMAGES)?;
        let mut am: oracle_image::ActiveModel = model.into();
        am.state = Set(lifecycle.state.to_string());
        am.replacementname = Set(lifecycle.replacementname);
        am.publishedon = Set(lifecycle.publishedon);
        am.deprecatedon = Set(lifecycle.deprecatedon);
        am.deletedon = Set(lifecycle.deletedon);
        am.changeinfo = Set(lifecycle.changeinfo);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        oracle_to_row(updated)
    }

    pub async fn delete_oracle_image(&self, id: &str) -> Result<bool> {
        let res = OracleEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }
}
