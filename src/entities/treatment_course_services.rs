use sea_orm::entity::prelude::*;

/// Per-service progress rows of a purchased course, copied from the package
/// constituents at enrollment time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "treatment_course_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub service_id: i64,
    pub position: i32,
    pub sessions_total: i32,
    pub sessions_completed: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
