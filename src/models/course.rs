use crate::entities::{
    CourseStatus, PaymentMethod, SessionStatus, course_entity, course_service_entity,
    package_entity, package_service_entity, session_entity,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageConstituentRequest {
    pub service_id: i64,
    /// Ordering within the package; defaults to list order when omitted.
    pub position: Option<i32>,
    #[schema(example = 5)]
    pub sessions_per_service: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePackageRequest {
    #[schema(example = "Glow & Relax (10 sessions)")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 75000)]
    pub price_cents: i64,
    #[schema(example = 180)]
    pub validity_days: i32,
    pub services: Vec<PackageConstituentRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub validity_days: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageServiceResponse {
    pub service_id: i64,
    pub position: i32,
    pub sessions_per_service: i32,
}

impl From<package_service_entity::Model> for PackageServiceResponse {
    fn from(row: package_service_entity::Model) -> Self {
        Self {
            service_id: row.service_id,
            position: row.position,
            sessions_per_service: row.sessions_per_service,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub validity_days: i32,
    pub is_active: bool,
    pub services: Vec<PackageServiceResponse>,
}

impl PackageResponse {
    pub fn new(
        package: package_entity::Model,
        services: Vec<package_service_entity::Model>,
    ) -> Self {
        Self {
            id: package.id,
            name: package.name,
            description: package.description,
            price_cents: package.price_cents,
            validity_days: package.validity_days,
            is_active: package.is_active,
            services: services
                .into_iter()
                .map(PackageServiceResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollCourseRequest {
    pub package_id: i64,
    pub method: PaymentMethod,
    pub promotion_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseServiceProgressResponse {
    pub service_id: i64,
    pub position: i32,
    pub sessions_total: i32,
    pub sessions_completed: i32,
    pub sessions_remaining: i32,
}

impl From<course_service_entity::Model> for CourseServiceProgressResponse {
    fn from(row: course_service_entity::Model) -> Self {
        let remaining = (row.sessions_total - row.sessions_completed).max(0);
        Self {
            service_id: row.service_id,
            position: row.position,
            sessions_total: row.sessions_total,
            sessions_completed: row.sessions_completed,
            sessions_remaining: remaining,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: i64,
    pub package_id: i64,
    pub status: CourseStatus,
    pub activated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub services: Vec<CourseServiceProgressResponse>,
}

impl CourseResponse {
    pub fn new(
        course: course_entity::Model,
        services: Vec<course_service_entity::Model>,
    ) -> Self {
        Self {
            id: course.id,
            package_id: course.package_id,
            status: course.status,
            activated_at: course.activated_at,
            expires_at: course.expires_at,
            services: services
                .into_iter()
                .map(CourseServiceProgressResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub id: i64,
    pub course_id: i64,
    pub course_service_id: i64,
    pub appointment_id: Option<i64>,
    pub status: SessionStatus,
    pub scheduled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<session_entity::Model> for SessionResponse {
    fn from(session: session_entity::Model) -> Self {
        Self {
            id: session.id,
            course_id: session.course_id,
            course_service_id: session.course_service_id,
            appointment_id: session.appointment_id,
            status: session.status,
            scheduled_at: session.scheduled_at,
            completed_at: session.completed_at,
        }
    }
}

/// Outcome of enrolling; `payment_intent` is present for card payments.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollCourseResponse {
    pub course: CourseResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<crate::models::payment::PaymentIntentResponse>,
}

/// Counters reported by one lifecycle pass.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LifecycleSummary {
    pub overdue_sessions: i64,
    pub completed_courses: i64,
    pub expired_courses: i64,
}
