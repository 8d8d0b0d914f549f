//! Migrator registering entity tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_airline;
mod m20240301_000002_create_airport;
mod m20240301_000003_create_airline_airport;
mod m20240301_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_airline::Migration),
            Box::new(m20240301_000002_create_airport::Migration),
            Box::new(m20240301_000003_create_airline_airport::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000004_add_indexes::Migration),
        ]
    }
}
