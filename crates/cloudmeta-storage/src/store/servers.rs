use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use cloudmeta_common::types::ServerType;

use crate::entities::amazon_server::{self, Column as AmazonCol, Entity as AmazonEntity};
use crate::entities::google_server::{self, Column as GoogleCol, Entity as GoogleEntity};
use crate::entities::microsoft_server::{self, Column as MicrosoftCol, Entity as MicrosoftEntity};
use crate::error::{map_db_err, Result, StorageError};
use crate::store::MetadataStore;
use crate::validate::check_server_name;

const AMAZON_SERVERS: &str = "amazonservers";
const GOOGLE_SERVERS: &str = "googleservers";
const MICROSOFT_SERVERS: &str = "microsoftservers";

/// A provider region or update server. All three provider tables share
/// this shape. Per-region uniqueness of non-null `ip`/`ipv6` is enforced
/// by partial unique indexes in the backing store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRow {
    /// Assigned by the database on insert; the given value is ignored.
    pub id: i32,
    pub server_type: ServerType,
    pub shape: Option<String>,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub region: String,
    pub ipv6: Option<String>,
}

/// Requested changes to a server row. Unset fields keep their stored
/// value; the merged candidate is re-validated, so switching a nameless
/// region server to `update` is rejected.
#[derive(Debug, Clone, Default)]
pub struct ServerUpdate {
    pub server_type: Option<ServerType>,
    pub shape: Option<String>,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub region: Option<String>,
    pub ipv6: Option<String>,
}

impl ServerRow {
    fn apply(&mut self, update: &ServerUpdate) {
        if let Some(kind) = update.server_type {
            self.server_type = kind;
        }
        if let Some(shape) = &update.shape {
            self.shape = Some(shape.clone());
        }
        if let Some(name) = &update.name {
            self.name = Some(name.clone());
        }
        if let Some(ip) = &update.ip {
            self.ip = Some(ip.clone());
        }
        if let Some(region) = &update.region {
            self.region = region.clone();
        }
        if let Some(ipv6) = &update.ipv6 {
            self.ipv6 = Some(ipv6.clone());
        }
    }
}

fn parse_type(table: &'static str, value: &str) -> Result<ServerType> {
    value.parse().map_err(|_| StorageError::Decode {
        table,
        column: "type",
        value: value.to_string(),
    })
}

fn amazon_to_row(m: amazon_server::Model) -> Result<ServerRow> {
    Ok(ServerRow {
        server_type: parse_type(AMAZON_SERVERS, &m.server_type)?,
        id: m.id,
        shape: m.shape,
        name: m.name,
        ip: m.ip,
        region: m.region,
        ipv6: m.ipv6,
    })
}

fn google_to_row(m: google_server::Model) -> Result<ServerRow> {
    Ok(ServerRow {
        server_type: parse_type(GOOGLE_SERVERS, &m.server_type)?,
        id: m.id,
        shape: m.shape,
        name: m.name,
        ip: m.ip,
        region: m.region,
        ipv6: m.ipv6,
    })
}

fn microsoft_to_row(m: microsoft_server::Model) -> Result<ServerRow> {
    Ok(ServerRow {
        server_type: parse_type(MICROSOFT_SERVERS, &m.server_type)?,
        id: m.id,
        shape: m.shape,
        name: m.name,
        ip: m.ip,
        region: m.region,
        ipv6: m.ipv6,
    })
}

impl MetadataStore {
    // ---- amazonservers ----

    pub async fn insert_amazon_server(&self, server: ServerRow) -> Result<ServerRow> {
        check_server_name(AMAZON_SERVERS, server.server_type, server.name.as_deref())?;
        let am = amazon_server::ActiveModel {
            id: NotSet,
            server_type: Set(server.server_type.to_string()),
            shape: Set(server.shape),
            name: Set(server.name),
            ip: Set(server.ip),
            region: Set(server.region),
            ipv6: Set(server.ipv6),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        amazon_to_row(model)
    }

    pub async fn get_amazon_server(&self, id: i32) -> Result<Option<ServerRow>> {
        let model = AmazonEntity::find_by_id(id).one(self.db()).await?;
        model.map(amazon_to_row).transpose()
    }

    pub async fn list_amazon_servers(
        &self,
        server_type: Option<ServerType>,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ServerRow>> {
        let mut q = AmazonEntity::find();
        if let Some(kind) = server_type {
            q = q.filter(AmazonCol::ServerType.eq(kind.to_string()));
        }
        if let Some(r) = region {
            q = q.filter(AmazonCol::Region.eq(r));
        }
        let rows = q
            .order_by(AmazonCol::Id, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(amazon_to_row).collect()
    }

    pub async fn update_amazon_server(
        &self,
        id: i32,
        update: &ServerUpdate,
    ) -> Result<ServerRow> {
        let model = AmazonEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "amazon server",
                id: id.to_string(),
            })?;
        let mut row = amazon_to_row(model.clone())?;
        row.apply(update);
        check_server_name(AMAZON_SERVERS, row.server_type, row.name.as_deref())?;
        let mut am: amazon_server::ActiveModel = model.into();
        am.server_type = Set(row.server_type.to_string());
        am.shape = Set(row.shape);
        am.name = Set(row.name);
        am.ip = Set(row.ip);
        am.region = Set(row.region);
        am.ipv6 = Set(row.ipv6);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        amazon_to_row(updated)
    }

    pub async fn delete_amazon_server(&self, id: i32) -> Result<bool> {
        let res = AmazonEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- googleservers ----

    pub async fn insert_google_server(&self, server: ServerRow) -> Result<ServerRow> {
        check_server_name(GOOGLE_SERVERS, server.server_type, server.name.as_deref())?;
        let am = google_server::ActiveModel {
            id: NotSet,
            server_type: Set(server.server_type.to_string()),
            shape: Set(server.shape),
            name: Set(server.name),
            ip: Set(server.ip),
            region: Set(server.region),
            ipv6: Set(server.ipv6),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        google_to_row(model)
    }

    pub async fn get_google_server(&self, id: i32) -> Result<Option<ServerRow>> {
        let model = GoogleEntity::find_by_id(id).one(self.db()).await?;
        model.map(google_to_row).transpose()
    }

    pub async fn list_google_servers(
        &self,
        server_type: Option<ServerType>,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ServerRow>> {
        let mut q = GoogleEntity::find();
        if let Some(kind) = server_type {
            q = q.filter(GoogleCol::ServerType.eq(kind.to_string()));
        }
        if let Some(r) = region {
            q = q.filter(GoogleCol::Region.eq(r));
        }
        let rows = q
            .order_by(GoogleCol::Id, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(google_to_row).collect()
    }

    pub async fn update_google_server(
        &self,
        id: i32,
        update: &ServerUpdate,
    ) -> Result<ServerRow> {
        let model = GoogleEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "google server",
                id: id.to_string(),
            })?;
        let mut row = google_to_row(model.clone())?;
        row.apply(update);
        check_server_name(GOOGLE_SERVERS, row.server_type, row.name.as_deref())?;
        let mut am: google_server::ActiveModel = model.into();
        am.server_type = Set(row.server_type.to_string());
        am.shape = Set(row.shape);
        am.name = Set(row.name);
        am.ip = Set(row.ip);
        am.region = Set(row.region);
        am.ipv6 = Set(row.ipv6);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        google_to_row(updated)
    }

    pub async fn delete_google_server(&self, id: i32) -> Result<bool> {
        let res = GoogleEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }

    // ---- microsoftservers ----

    pub async fn insert_microsoft_server(&self, server: ServerRow) -> Result<ServerRow> {
        check_server_name(MICROSOFT_SERVERS, server.server_type, server.name.as_deref())?;
        let am = microsoft_server::ActiveModel {
            id: NotSet,
            server_type: Set(server.server_type.to_string()),
            shape: Set(server.shape),
            name: Set(server.name),
            ip: Set(server.ip),
            region: Set(server.region),
            ipv6: Set(server.ipv6),
        };
        let model = am.insert(self.db()).await.map_err(map_db_err)?;
        microsoft_to_row(model)
    }

    pub async fn get_microsoft_server(&self, id: i32) -> Result<Option<ServerRow>> {
        let model = MicrosoftEntity::find_by_id(id).one(self.db()).await?;
        model.map(microsoft_to_row).transpose()
    }

    pub async fn list_microsoft_servers(
        &self,
        server_type: Option<ServerType>,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ServerRow>> {
        let mut q = MicrosoftEntity::find();
        if let Some(kind) = server_type {
            q = q.filter(MicrosoftCol::ServerType.eq(kind.to_string()));
        }
        if let Some(r) = region {
            q = q.filter(MicrosoftCol::Region.eq(r));
        }
        let rows = q
            .order_by(MicrosoftCol::Id, Order::Asc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(microsoft_to_row).collect()
    }

    pub async fn update_microsoft_server(
        &self,
        id: i32,
        update: &ServerUpdate,
    ) -> Result<ServerRow> {
        let model = MicrosoftEntity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "microsoft server",
                id: id.to_string(),
            })?;
        let mut row = microsoft_to_row(model.clone())?;
        row.apply(update);
        check_server_name(MICROSOFT_SERVERS, row.server_type, row.name.as_deref())?;
        let mut am: microsoft_server::ActiveModel = model.into();
        am.server_type = Set(row.server_type.to_string());
        am.shape = Set(row.shape);
        am.name = Set(row.name);
        am.ip = Set(row.ip);
        am.region = Set(row.region);
        am.ipv6 = Set(row.ipv6);
        let updated = am.update(self.db()).await.map_err(map_db_err)?;
        microsoft_to_row(updated)
    }

    pub async fn delete_microsoft_server(&self, id: i32) -> Result<bool> {
        let res = MicrosoftEntity::delete_by_id(id).exec(self.db()).await?;
        Ok(res.rows_affected > 0)
    }
}
