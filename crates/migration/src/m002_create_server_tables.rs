use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m002_create_server_tables"
    }
}

const SERVER_TABLES: &[&str] = &["amazonservers", "googleservers", "microsoftservers"];

fn server_table(name: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(name))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new("id"))
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Alias::new("type"))
                .string()
                .not_null()
                .check(Expr::col(Alias::new("type")).is_in(["region", "update"])),
        )
        .col(ColumnDef::new(Alias::new("shape")).string_len(10))
        .col(ColumnDef::new(Alias::new("name")).string_len(100))
        .col(ColumnDef::new(Alias::new("ip")).string())
        .col(ColumnDef::new(Alias::new("region")).string_len(100).not_null())
        .col(ColumnDef::new(Alias::new("ipv6")).string())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for table in SERVER_TABLES {
            manager.create_table(server_table(table)).await?;

            // Partial unique indexes: address uniqueness per region applies
            // only to rows that actually carry an address. sea-query has no
            // builder support for the WHERE clause, so these go out as SQL.
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX uix_{table}_region_ip_not_null \
                 ON {table} (region, ip) WHERE ip IS NOT NULL"
            ))
            .await?;
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX uix_{table}_region_ipv6_not_null \
                 ON {table} (region, ipv6) WHERE ipv6 IS NOT NULL"
            ))
            .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in SERVER_TABLES {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
