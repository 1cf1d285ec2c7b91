use sea_orm::entity::prelude::*;

/// Join table between packages and services, carrying the ordering of the
/// constituents and how many sessions each one grants.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "treatment_package_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub package_id: i64,
    pub service_id: i64,
    pub position: i32,
    pub sessions_per_service: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
