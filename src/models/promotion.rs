use crate::entities::{PromotionKind, promotion_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    pub id: i64,
    pub code: String,
    pub description: Option<String>,
    pub kind: PromotionKind,
    pub value: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub max_uses: Option<i64>,
    pub used_count: i64,
    pub min_amount_cents: i64,
    pub is_active: bool,
}

impl From<promotion_entity::Model> for PromotionResponse {
    fn from(promotion: promotion_entity::Model) -> Self {
        Self {
            id: promotion.id,
            code: promotion.code,
            description: promotion.description,
            kind: promotion.kind,
            value: promotion.value,
            starts_at: promotion.starts_at,
            ends_at: promotion.ends_at,
            max_uses: promotion.max_uses,
            used_count: promotion.used_count,
            min_amount_cents: promotion.min_amount_cents,
            is_active: promotion.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePromotionRequest {
    /// Generated when omitted.
    #[schema(example = "SPRING20")]
    pub code: Option<String>,
    pub description: Option<String>,
    pub kind: PromotionKind,
    pub value: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub max_uses: Option<i64>,
    pub min_amount_cents: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePromotionRequest {
    pub description: Option<String>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i64>,
    pub min_amount_cents: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ValidatePromotionQuery {
    pub code: String,
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionPreviewResponse {
    pub code: String,
    pub discount_cents: i64,
    pub final_amount_cents: i64,
}
