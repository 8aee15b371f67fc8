//! Migrator registering entity-specific migrations in dependency order.
//! Seed data follows the tables it fills; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_category;
mod m20220101_000002_create_question;
mod m20220101_000003_seed_categories;
mod m20220101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_category::Migration),
            Box::new(m20220101_000002_create_question::Migration),
            Box::new(m20220101_000003_seed_categories::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000004_add_indexes::Migration),
        ]
    }
}
