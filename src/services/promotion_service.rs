use crate::entities::{PromotionKind, promotion_entity as promotions};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::generate_promotion_code;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct PromotionService {
    pool: DatabaseConnection,
}

/// Discount applied by a promotion to `amount_cents`. Percent promotions
/// never exceed the full amount; fixed promotions never push it negative.
pub fn compute_discount(kind: &PromotionKind, value: i64, amount_cents: i64) -> i64 {
    match kind {
        PromotionKind::Percent => {
            let pct = value.clamp(0, 100);
            amount_cents * pct / 100
        }
        PromotionKind::FixedAmount => value.clamp(0, amount_cents),
    }
}

impl PromotionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_promotion(&self, req: CreatePromotionRequest) -> AppResult<PromotionResponse> {
        match req.kind {
            PromotionKind::Percent => {
                if !(1..=100).contains(&req.value) {
                    return Err(AppError::ValidationError(
                        "Percent discount must be between 1 and 100".to_string(),
                    ));
                }
            }
            PromotionKind::FixedAmount => {
                if req.value <= 0 {
                    return Err(AppError::ValidationError(
                        "Fixed discount must be positive".to_string(),
                    ));
                }
            }
        }
        if req.ends_at <= req.starts_at {
            return Err(AppError::ValidationError(
                "Promotion window is empty".to_string(),
            ));
        }

        let code = match req.code {
            Some(code) => {
                let code = code.trim().to_uppercase();
                if code.len() < 3 || code.len() > 32 {
                    return Err(AppError::ValidationError(
                        "Promotion code must be between 3 and 32 characters".to_string(),
                    ));
                }
                code
            }
            None => generate_promotion_code(),
        };

        let existing = promotions::Entity::find()
            .filter(promotions::Column::Code.eq(code.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Promotion code already exists".to_string(),
            ));
        }

        let model = promotions::ActiveModel {
            code: Set(code),
            description: Set(req.description),
            kind: Set(req.kind),
            value: Set(req.value),
            starts_at: Set(req.starts_at),
            ends_at: Set(req.ends_at),
            max_uses: Set(req.max_uses),
            used_count: Set(0),
            min_amount_cents: Set(req.min_amount_cents.unwrap_or(0)),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(PromotionResponse::from(model))
    }

    pub async fn update_promotion(
        &self,
        promotion_id: i64,
        req: UpdatePromotionRequest,
    ) -> AppResult<PromotionResponse> {
        let promotion = promotions::Entity::find_by_id(promotion_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Promotion not found".to_string()))?;

        let mut model = promotion.into_active_model();
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(ends_at) = req.ends_at {
            model.ends_at = Set(ends_at);
        }
        if let Some(max_uses) = req.max_uses {
            model.max_uses = Set(Some(max_uses));
        }
        if let Some(min_amount) = req.min_amount_cents {
            model.min_amount_cents = Set(min_amount);
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;

        Ok(PromotionResponse::from(updated))
    }

    pub async fn list_promotions(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PromotionResponse>> {
        let total = promotions::Entity::find().count(&self.pool).await? as i64;

        let models = promotions::Entity::find()
            .order_by_desc(promotions::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<PromotionResponse> =
            models.into_iter().map(PromotionResponse::from).collect();

        Ok(PaginatedResponse::from_params(items, params, total))
    }

    /// Resolve a code against an order amount; returns the promotion row and
    /// the discount it grants. All the rejection reasons surface as
    /// validation errors so the client can show them verbatim.
    pub async fn validate_code(
        &self,
        code: &str,
        amount_cents: i64,
    ) -> AppResult<(promotions::Model, i64)> {
        let code = code.trim().to_uppercase();
        let promotion = promotions::Entity::find()
            .filter(promotions::Column::Code.eq(code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Promotion code not found".to_string()))?;

        if !promotion.is_active {
            return Err(AppError::ValidationError(
                "Promotion is no longer active".to_string(),
            ));
        }
        let now = Utc::now();
        if now < promotion.starts_at || now > promotion.ends_at {
            return Err(AppError::ValidationError(
                "Promotion is not currently valid".to_string(),
            ));
        }
        if let Some(max_uses) = promotion.max_uses
            && promotion.used_count >= max_uses
        {
            return Err(AppError::ValidationError(
                "Promotion has been fully redeemed".to_string(),
            ));
        }
        if amount_cents < promotion.min_amount_cents {
            return Err(AppError::ValidationError(format!(
                "Order must be at least {} cents to use this promotion",
                promotion.min_amount_cents
            )));
        }

        let discount = compute_discount(&promotion.kind, promotion.value, amount_cents);
        Ok((promotion, discount))
    }

    pub async fn preview(
        &self,
        code: &str,
        amount_cents: i64,
    ) -> AppResult<PromotionPreviewResponse> {
        let (promotion, discount) = self.validate_code(code, amount_cents).await?;
        Ok(PromotionPreviewResponse {
            code: promotion.code,
            discount_cents: discount,
            final_amount_cents: amount_cents - discount,
        })
    }

    /// Called once per successful payment that carried the code.
    pub async fn mark_used(&self, promotion_id: i64) -> AppResult<()> {
        if let Some(promotion) = promotions::Entity::find_by_id(promotion_id)
            .one(&self.pool)
            .await?
        {
            let used = promotion.used_count + 1;
            let mut model = promotion.into_active_model();
            model.used_count = Set(used);
            model.update(&self.pool).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_discount() {
        assert_eq!(compute_discount(&PromotionKind::Percent, 20, 10000), 2000);
        assert_eq!(compute_discount(&PromotionKind::Percent, 100, 10000), 10000);
        // values above 100 clamp to the full amount
        assert_eq!(compute_discount(&PromotionKind::Percent, 150, 10000), 10000);
    }

    #[test]
    fn test_fixed_discount() {
        assert_eq!(
            compute_discount(&PromotionKind::FixedAmount, 500, 10000),
            500
        );
        // never larger than the order itself
        assert_eq!(
            compute_discount(&PromotionKind::FixedAmount, 20000, 10000),
            10000
        );
        assert_eq!(compute_discount(&PromotionKind::FixedAmount, -5, 10000), 0);
    }

    #[test]
    fn test_percent_discount_rounds_down() {
        assert_eq!(compute_discount(&PromotionKind::Percent, 33, 101), 33);
    }
}
