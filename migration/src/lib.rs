pub use sea_orm_migration::prelude::*;

mod m20250901_000001_initial;
mod m20250910_000001_add_promotions_reviews;
mod m20250918_000001_add_notifications;
mod m20250925_000001_add_treatment_courses;
mod m20251002_000001_add_appointment_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial::Migration),
            Box::new(m20250910_000001_add_promotions_reviews::Migration),
            Box::new(m20250918_000001_add_notifications::Migration),
            Box::new(m20250925_000001_add_treatment_courses::Migration),
            Box::new(m20251002_000001_add_appointment_indexes::Migration),
        ]
    }
}
