use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_create_image_tables"
    }
}

const IMAGE_TABLES: &[&str] = &[
    "amazonimages",
    "alibabaimages",
    "googleimages",
    "microsoftimages",
    "oracleimages",
];

/// Appends the lifecycle columns shared by every provider image table.
fn lifecycle_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Alias::new("state"))
                .string()
                .not_null()
                .check(Expr::col(Alias::new("state")).is_in([
                    "active",
                    "inactive",
                    "deprecated",
                    "deleted",
                ])),
        )
        .col(ColumnDef::new(Alias::new("replacementname")).string_len(255))
        .col(ColumnDef::new(Alias::new("publishedon")).date().not_null())
        .col(ColumnDef::new(Alias::new("deprecatedon")).date())
        .col(ColumnDef::new(Alias::new("deletedon")).date())
        .col(ColumnDef::new(Alias::new("changeinfo")).string_len(255))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // amazonimages and alibabaimages share the same shape
        for table in ["amazonimages", "alibabaimages"] {
            manager
                .create_table(
                    lifecycle_columns(
                        Table::create()
                            .table(Alias::new(table))
                            .if_not_exists()
                            .col(
                                ColumnDef::new(Alias::new("id"))
                                    .string_len(100)
                                    .not_null()
                                    .primary_key(),
                            )
                            .col(ColumnDef::new(Alias::new("name")).string_len(255).not_null())
                            .col(ColumnDef::new(Alias::new("replacementid")).string_len(100))
                            .col(ColumnDef::new(Alias::new("region")).string_len(100).not_null()),
                    )
                    .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                lifecycle_columns(
                    Table::create()
                        .table(Alias::new("googleimages"))
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Alias::new("name"))
                                .string_len(255)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Alias::new("project")).string_len(50).not_null()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                lifecycle_columns(
                    Table::create()
                        .table(Alias::new("microsoftimages"))
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Alias::new("id"))
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Alias::new("name")).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Alias::new("environment"))
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Alias::new("urn")).string_len(100)),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uix_microsoftimages_name_environment")
                    .table(Alias::new("microsoftimages"))
                    .col(Alias::new("name"))
                    .col(Alias::new("environment"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                lifecycle_columns(
                    Table::create()
                        .table(Alias::new("oracleimages"))
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Alias::new("id"))
                                .string_len(100)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Alias::new("name")).string_len(255).not_null())
                        .col(ColumnDef::new(Alias::new("replacementid")).string_len(100)),
                )
                .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in IMAGE_TABLES {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
