use crate::entities::{NotificationKind, notification_entity as notifications};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct NotificationService {
    pool: DatabaseConnection,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Fire-and-record: inserting a notification must never abort the
    /// surrounding business operation, so callers usually ignore the error
    /// after it is logged here.
    pub async fn notify(
        &self,
        user_id: i64,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> AppResult<()> {
        let result = notifications::ActiveModel {
            user_id: Set(user_id),
            kind: Set(kind),
            title: Set(title.to_string()),
            body: Set(body.to_string()),
            is_read: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        if let Err(e) = result {
            log::error!("Failed to insert notification for user {user_id}: {e:?}");
            return Err(AppError::DatabaseError(e));
        }
        Ok(())
    }

    pub async fn list_notifications(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<(PaginatedResponse<NotificationResponse>, i64)> {
        let total = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        let unread = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.pool)
            .await? as i64;

        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<NotificationResponse> =
            models.into_iter().map(NotificationResponse::from).collect();

        Ok((PaginatedResponse::from_params(items, params, total), unread))
    }

    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> AppResult<()> {
        let notification = notifications::Entity::find_by_id(notification_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        let mut model = notification.into_active_model();
        model.is_read = Set(true);
        model.update(&self.pool).await?;
        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: i64) -> AppResult<u64> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected)
    }
}
