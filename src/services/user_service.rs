use crate::entities::{
    CourseStatus, PaymentPurpose, PaymentStatus, UserRole, appointment_entity as appointments,
    course_entity as courses, notification_entity as notifications, payment_entity as payments,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{validate_display_name, validate_phone};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_user_profile(
        &self,
        user_id: i64,
    ) -> AppResult<(UserResponse, UserStatistics)> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let statistics = self.get_user_statistics(user_id).await?;

        Ok((UserResponse::from(user), statistics))
    }

    pub async fn update_user_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        if request.display_name.is_none() && request.phone.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(display_name) = &request.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(phone) = &request.phone {
            validate_phone(phone)?;
        }

        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            .into_active_model();
        if let Some(display_name) = request.display_name {
            model.display_name = Set(display_name.trim().to_string());
        }
        if let Some(phone) = request.phone {
            model.phone = Set(Some(phone));
        }
        let updated = model.update(&self.pool).await?;

        Ok(UserResponse::from(updated))
    }

    async fn get_user_statistics(&self, user_id: i64) -> AppResult<UserStatistics> {
        let total_appointments = appointments::Entity::find()
            .filter(appointments::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct SpentRow {
            total_spent: Option<i64>,
        }
        let total_spent = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .filter(payments::Column::Status.eq(PaymentStatus::Succeeded))
            .filter(payments::Column::Purpose.ne(PaymentPurpose::WalletTopup))
            .select_only()
            .column_as(
                Expr::col(payments::Column::AmountCents)
                    .sum()
                    .cast_as(Alias::new("bigint")),
                "total_spent",
            )
            .into_model::<SpentRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.total_spent)
            .unwrap_or(0);

        let active_courses = courses::Entity::find()
            .filter(courses::Column::UserId.eq(user_id))
            .filter(courses::Column::Status.eq(CourseStatus::Active))
            .count(&self.pool)
            .await? as i64;

        let unread_notifications = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.pool)
            .await? as i64;

        Ok(UserStatistics {
            total_appointments,
            total_spent_cents: total_spent,
            active_courses,
            unread_notifications,
        })
    }

    /// Active staff for the public booking UI.
    pub async fn list_staff(&self) -> AppResult<Vec<StaffResponse>> {
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Staff))
            .order_by_asc(users::Column::DisplayName)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(StaffResponse::from).collect())
    }

    pub async fn list_users(
        &self,
        query: &UserListQuery,
    ) -> AppResult<PaginatedResponse<UserResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut finder = users::Entity::find();
        if let Some(role) = &query.role {
            finder = finder.filter(users::Column::Role.eq(role.clone()));
        }

        let total = finder.clone().count(&self.pool).await? as i64;

        let models = finder
            .order_by_desc(users::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<UserResponse> = models.into_iter().map(UserResponse::from).collect();

        Ok(PaginatedResponse::from_params(items, &params, total))
    }

    pub async fn update_user_role(&self, user_id: i64, role: UserRole) -> AppResult<UserResponse> {
        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            .into_active_model();
        model.role = Set(role);
        let updated = model.update(&self.pool).await?;
        Ok(UserResponse::from(updated))
    }
}
