use crate::entities::{
    CourseStatus, PaymentPurpose, PaymentStatus, appointment_entity as appointments,
    course_entity as courses, payment_entity as payments, user_entity as users,
};
use crate::error::AppResult;
use crate::models::*;
use chrono::{Datelike, Duration, TimeZone, Utc};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

#[derive(Clone)]
pub struct StatsService {
    pool: DatabaseConnection,
}

impl StatsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_admin_stats(&self) -> AppResult<AdminStatsResponse> {
        let now = Utc::now();

        let total_users = users::Entity::find().count(&self.pool).await? as i64;

        let today_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
            .single()
            .unwrap_or(now);
        let today_end = today_start + Duration::days(1);
        let appointments_today = appointments::Entity::find()
            .filter(appointments::Column::StartsAt.gte(today_start))
            .filter(appointments::Column::StartsAt.lt(today_end))
            .count(&self.pool)
            .await? as i64;

        // Revenue = succeeded service payments this month; topups are a
        // liability until spent, so they are excluded.
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        #[derive(Debug, sea_orm::FromQueryResult)]
        struct RevenueRow {
            revenue: Option<i64>,
        }
        let revenue_month_cents = payments::Entity::find()
            .filter(payments::Column::Status.eq(PaymentStatus::Succeeded))
            .filter(payments::Column::Purpose.ne(PaymentPurpose::WalletTopup))
            .filter(payments::Column::CreatedAt.gte(month_start))
            .select_only()
            .column_as(
                Expr::col(payments::Column::AmountCents)
                    .sum()
                    .cast_as(Alias::new("bigint")),
                "revenue",
            )
            .into_model::<RevenueRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.revenue)
            .unwrap_or(0);

        let active_courses = courses::Entity::find()
            .filter(courses::Column::Status.eq(CourseStatus::Active))
            .count(&self.pool)
            .await? as i64;

        Ok(AdminStatsResponse {
            total_users,
            appointments_today,
            revenue_month_cents,
            active_courses,
        })
    }
}
