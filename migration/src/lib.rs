pub use sea_orm_migration::prelude::*;

mod m20260830_000001_create_line_table;
mod m20260830_000002_create_stop_table;
mod m20260830_000003_create_line_stop_table;
mod m20260830_000004_create_trip_table;
mod m20260830_000005_create_stop_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260830_000001_create_line_table::Migration),
            Box::new(m20260830_000002_create_stop_table::Migration),
            Box::new(m20260830_000003_create_line_stop_table::Migration),
            Box::new(m20260830_000004_create_trip_table::Migration),
            Box::new(m20260830_000005_create_stop_event_table::Migration),
        ]
    }
}
