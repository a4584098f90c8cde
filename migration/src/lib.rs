pub use sea_orm_migration::prelude::*;

mod m20250610_000001_create_users;
mod m20250610_000002_create_courses;
mod m20250610_000003_create_prices;
mod m20250610_000004_create_bookings;
mod m20250610_000005_create_reviews;
mod m20250610_000006_create_static_pages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250610_000001_create_users::Migration),
            Box::new(m20250610_000002_create_courses::Migration),
            Box::new(m20250610_000003_create_prices::Migration),
            Box::new(m20250610_000004_create_bookings::Migration),
            Box::new(m20250610_000005_create_reviews::Migration),
            Box::new(m20250610_000006_create_static_pages::Migration),
        ]
    }
}
