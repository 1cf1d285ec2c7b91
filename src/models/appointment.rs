use crate::entities::{AppointmentStatus, PaymentMethod, appointment_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookAppointmentRequest {
    pub service_id: i64,
    pub starts_at: DateTime<Utc>,
    pub staff_id: Option<i64>,
    pub room_id: Option<i64>,
    /// When set, the booking consumes a session of this treatment course
    /// instead of requiring payment.
    pub course_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: i64,
    pub user_id: i64,
    pub service_id: i64,
    pub staff_id: Option<i64>,
    pub room_id: Option<i64>,
    pub status: AppointmentStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price_cents: i64,
    pub paid_by_course: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<appointment_entity::Model> for AppointmentResponse {
    fn from(appointment: appointment_entity::Model) -> Self {
        Self {
            id: appointment.id,
            user_id: appointment.user_id,
            service_id: appointment.service_id,
            staff_id: appointment.staff_id,
            room_id: appointment.room_id,
            status: appointment.status,
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
            price_cents: appointment.price_cents,
            paid_by_course: appointment.paid_by_course,
            notes: appointment.notes,
            created_at: appointment.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AppointmentListQuery {
    pub status: Option<AppointmentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayAppointmentRequest {
    pub method: PaymentMethod,
    #[schema(example = "SPRING20")]
    pub promotion_code: Option<String>,
}
