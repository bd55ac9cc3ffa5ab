pub use sea_orm_migration::prelude::*;

mod m20250610_090000_merchants;
mod m20250610_120000_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250610_090000_merchants::Migration),
            Box::new(m20250610_120000_transactions::Migration),
        ]
    }
}
