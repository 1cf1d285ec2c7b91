use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminStatsResponse {
    pub total_users: i64,
    pub appointments_today: i64,
    pub revenue_month_cents: i64,
    pub active_courses: i64,
}
