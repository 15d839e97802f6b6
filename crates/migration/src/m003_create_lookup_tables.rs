use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m003_create_lookup_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("microsoftregionmap"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("environment"))
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("region")).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Alias::new("canonicalname"))
                            .string_len(100)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Alias::new("environment"))
                            .col(Alias::new("region"))
                            .col(Alias::new("canonicalname")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("versions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("tablename"))
                            .string_len(100)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("version")).double().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ["microsoftregionmap", "versions"] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
