pub use sea_orm_migration::prelude::*;

mod iden;
mod m20250118_101500_identity_tables;
mod m20250204_174233_event_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250118_101500_identity_tables::Migration),
            Box::new(m20250204_174233_event_tables::Migration),
        ]
    }
}
