use crate::entities::{
    AppointmentStatus, appointment_entity as appointments, review_entity as reviews,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ReviewService {
    pool: DatabaseConnection,
}

impl ReviewService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// One review per completed appointment, by its owner.
    pub async fn create_review(
        &self,
        user_id: i64,
        req: CreateReviewRequest,
    ) -> AppResult<ReviewResponse> {
        if !(1..=5).contains(&req.rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let appointment = appointments::Entity::find_by_id(req.appointment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.user_id != user_id {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }
        if appointment.status != AppointmentStatus::Completed {
            return Err(AppError::ValidationError(
                "Only completed appointments can be reviewed".to_string(),
            ));
        }

        let existing = reviews::Entity::find()
            .filter(reviews::Column::AppointmentId.eq(req.appointment_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Appointment has already been reviewed".to_string(),
            ));
        }

        let model = reviews::ActiveModel {
            user_id: Set(user_id),
            service_id: Set(appointment.service_id),
            appointment_id: Set(req.appointment_id),
            rating: Set(req.rating),
            comment: Set(req.comment),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ReviewResponse::from(model))
    }

    pub async fn list_for_service(
        &self,
        service_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ReviewResponse>> {
        let total = reviews::Entity::find()
            .filter(reviews::Column::ServiceId.eq(service_id))
            .count(&self.pool)
            .await? as i64;

        let models = reviews::Entity::find()
            .filter(reviews::Column::ServiceId.eq(service_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<ReviewResponse> = models.into_iter().map(ReviewResponse::from).collect();

        Ok(PaginatedResponse::from_params(items, params, total))
    }

    /// Moderation path.
    pub async fn delete_review(&self, review_id: i64) -> AppResult<()> {
        let review = reviews::Entity::find_by_id(review_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
        review.delete(&self.pool).await?;
        Ok(())
    }
}
