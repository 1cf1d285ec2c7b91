use crate::entities::{service_category_entity, service_entity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<service_category_entity::Model> for CategoryResponse {
    fn from(category: service_category_entity::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Massages")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub is_active: bool,
}

impl From<service_entity::Model> for ServiceResponse {
    fn from(service: service_entity::Model) -> Self {
        Self {
            id: service.id,
            category_id: service.category_id,
            name: service.name,
            description: service.description,
            price_cents: service.price_cents,
            duration_minutes: service.duration_minutes,
            is_active: service.is_active,
        }
    }
}

/// Service detail together with its review aggregate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceDetailResponse {
    #[serde(flatten)]
    pub service: ServiceResponse,
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub category_id: i64,
    #[schema(example = "Deep tissue massage")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 9000)]
    pub price_cents: i64,
    #[schema(example = 60)]
    pub duration_minutes: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateServiceRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ServiceListQuery {
    pub category_id: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
