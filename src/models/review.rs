use crate::entities::review_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub appointment_id: i64,
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub user_id: i64,
    pub service_id: i64,
    pub appointment_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<review_entity::Model> for ReviewResponse {
    fn from(review: review_entity::Model) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            service_id: review.service_id,
            appointment_id: review.appointment_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.unwrap_or_else(Utc::now),
        }
    }
}
