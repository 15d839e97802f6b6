pub use sea_orm_migration::prelude::*;

mod m001_create_image_tables;
mod m002_create_server_tables;
mod m003_create_lookup_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_image_tables::Migration),
            Box::new(m002_create_server_tables::Migration),
            Box::new(m003_create_lookup_tables::Migration),
        ]
    }
}
