use crate::entities::{
    AppointmentStatus, NotificationKind, UserRole, appointment_entity as appointments,
    room_entity as rooms, service_entity as services, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{CourseService, NotificationService, PaymentService};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// A customer may cancel while the start is at least `cutoff_hours` away.
fn cancellable(now: DateTime<Utc>, starts_at: DateTime<Utc>, cutoff_hours: i64) -> bool {
    starts_at - now >= Duration::hours(cutoff_hours)
}

#[derive(Clone)]
pub struct AppointmentService {
    pool: DatabaseConnection,
    course_service: CourseService,
    payment_service: PaymentService,
    notification_service: NotificationService,
    cancellation_cutoff_hours: i64,
}

impl AppointmentService {
    pub fn new(
        pool: DatabaseConnection,
        course_service: CourseService,
        payment_service: PaymentService,
        notification_service: NotificationService,
        cancellation_cutoff_hours: i64,
    ) -> Self {
        Self {
            pool,
            course_service,
            payment_service,
            notification_service,
            cancellation_cutoff_hours,
        }
    }

    // ------------------------------------------------------------------
    // Booking
    // ------------------------------------------------------------------

    pub async fn book(
        &self,
        user_id: i64,
        req: BookAppointmentRequest,
    ) -> AppResult<AppointmentResponse> {
        let service = services::Entity::find_by_id(req.service_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
        if !service.is_active {
            return Err(AppError::ValidationError(
                "Service is not available".to_string(),
            ));
        }

        if req.starts_at <= Utc::now() {
            return Err(AppError::ValidationError(
                "Appointment must start in the future".to_string(),
            ));
        }
        let ends_at = req.starts_at + Duration::minutes(service.duration_minutes as i64);

        if let Some(staff_id) = req.staff_id {
            let staff = users::Entity::find_by_id(staff_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;
            if staff.role != UserRole::Staff {
                return Err(AppError::ValidationError(
                    "Selected user is not a staff member".to_string(),
                ));
            }
            if self.staff_has_overlap(staff_id, req.starts_at, ends_at).await? {
                return Err(AppError::ValidationError(
                    "Staff member is not available at that time".to_string(),
                ));
            }
        }

        let room_id = match req.room_id {
            Some(room_id) => {
                let room = rooms::Entity::find_by_id(room_id)
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
                if !room.is_active {
                    return Err(AppError::ValidationError(
                        "Room is not available".to_string(),
                    ));
                }
                if self.room_has_overlap(room_id, req.starts_at, ends_at).await? {
                    return Err(AppError::ValidationError(
                        "Room is not available at that time".to_string(),
                    ));
                }
                Some(room_id)
            }
            None => Some(self.auto_assign_room(req.starts_at, ends_at).await?),
        };

        // Course-covered bookings consume a session instead of payment
        let course_context = match req.course_id {
            Some(course_id) => {
                let (course, course_service) = self
                    .course_service
                    .find_consumable(user_id, course_id, req.service_id)
                    .await?;
                Some((course.id, course_service.id))
            }
            None => None,
        };

        let paid_by_course = course_context.is_some();
        let status = if paid_by_course {
            // prepaid, no payment step
            AppointmentStatus::Confirmed
        } else {
            AppointmentStatus::Pending
        };

        let appointment = appointments::ActiveModel {
            user_id: Set(user_id),
            service_id: Set(req.service_id),
            staff_id: Set(req.staff_id),
            room_id: Set(room_id),
            status: Set(status),
            starts_at: Set(req.starts_at),
            ends_at: Set(ends_at),
            price_cents: Set(service.price_cents),
            paid_by_course: Set(paid_by_course),
            notes: Set(req.notes),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        if let Some((course_id, course_service_id)) = course_context {
            self.course_service
                .create_session(course_id, course_service_id, appointment.id, req.starts_at)
                .await?;
        }

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Appointment,
                "Appointment booked",
                &format!(
                    "Your {} appointment on {} is booked.",
                    service.name,
                    req.starts_at.format("%Y-%m-%d %H:%M")
                ),
            )
            .await;

        Ok(AppointmentResponse::from(appointment))
    }

    /// First active room with no conflicting appointment.
    async fn auto_assign_room(
        &self,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> AppResult<i64> {
        let candidates = rooms::Entity::find()
            .filter(rooms::Column::IsActive.eq(true))
            .order_by_asc(rooms::Column::Id)
            .all(&self.pool)
            .await?;

        for room in candidates {
            if !self.room_has_overlap(room.id, starts_at, ends_at).await? {
                return Ok(room.id);
            }
        }
        Err(AppError::ValidationError(
            "No room available at that time".to_string(),
        ))
    }

    async fn room_has_overlap(
        &self,
        room_id: i64,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let count = appointments::Entity::find()
            .filter(appointments::Column::RoomId.eq(room_id))
            .filter(appointments::Column::Status.is_in([
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
            ]))
            .filter(appointments::Column::StartsAt.lt(ends_at))
            .filter(appointments::Column::EndsAt.gt(starts_at))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn staff_has_overlap(
        &self,
        staff_id: i64,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let count = appointments::Entity::find()
            .filter(appointments::Column::StaffId.eq(staff_id))
            .filter(appointments::Column::Status.is_in([
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
            ]))
            .filter(appointments::Column::StartsAt.lt(ends_at))
            .filter(appointments::Column::EndsAt.gt(starts_at))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn get_appointment(
        &self,
        user_id: i64,
        appointment_id: i64,
    ) -> AppResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if appointment.user_id != user_id {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }
        Ok(AppointmentResponse::from(appointment))
    }

    pub async fn list_my_appointments(
        &self,
        user_id: i64,
        query: &AppointmentListQuery,
    ) -> AppResult<PaginatedResponse<AppointmentResponse>> {
        self.list_filtered(Some(user_id), query).await
    }

    /// Staff/admin view over all bookings.
    pub async fn list_schedule(
        &self,
        query: &AppointmentListQuery,
    ) -> AppResult<PaginatedResponse<AppointmentResponse>> {
        self.list_filtered(None, query).await
    }

    async fn list_filtered(
        &self,
        user_id: Option<i64>,
        query: &AppointmentListQuery,
    ) -> AppResult<PaginatedResponse<AppointmentResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut finder = appointments::Entity::find();
        if let Some(user_id) = user_id {
            finder = finder.filter(appointments::Column::UserId.eq(user_id));
        }
        if let Some(status) = &query.status {
            finder = finder.filter(appointments::Column::Status.eq(status.clone()));
        }
        if let Some(from) = query.from {
            finder = finder.filter(appointments::Column::StartsAt.gte(from));
        }
        if let Some(to) = query.to {
            finder = finder.filter(appointments::Column::StartsAt.lt(to));
        }

        let total = finder.clone().count(&self.pool).await? as i64;

        let models = finder
            .order_by_desc(appointments::Column::StartsAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<AppointmentResponse> = models
            .into_iter()
            .map(AppointmentResponse::from)
            .collect();

        Ok(PaginatedResponse::from_params(items, &params, total))
    }

    async fn load(&self, appointment_id: i64) -> AppResult<appointments::Model> {
        appointments::Entity::find_by_id(appointment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }

    // ------------------------------------------------------------------
    // Status transitions
    // ------------------------------------------------------------------

    pub async fn cancel(&self, user_id: i64, appointment_id: i64) -> AppResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if appointment.user_id != user_id {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }
        if !matches!(
            appointment.status,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        ) {
            return Err(AppError::ValidationError(
                "Appointment can no longer be cancelled".to_string(),
            ));
        }
        if !cancellable(Utc::now(), appointment.starts_at, self.cancellation_cutoff_hours) {
            return Err(AppError::ValidationError(format!(
                "Appointments must be cancelled at least {} hours in advance",
                self.cancellation_cutoff_hours
            )));
        }

        let snapshot = appointment.clone();
        let mut model = appointment.into_active_model();
        model.status = Set(AppointmentStatus::Cancelled);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        if snapshot.paid_by_course {
            self.course_service
                .release_session_for_appointment(appointment_id)
                .await?;
        } else {
            self.payment_service
                .refund_appointment_payment(appointment_id)
                .await?;
        }

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Appointment,
                "Appointment cancelled",
                &format!(
                    "Your appointment on {} was cancelled.",
                    snapshot.starts_at.format("%Y-%m-%d %H:%M")
                ),
            )
            .await;

        Ok(AppointmentResponse::from(updated))
    }

    /// Staff override, e.g. pay-at-venue bookings.
    pub async fn confirm(&self, appointment_id: i64) -> AppResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if appointment.status != AppointmentStatus::Pending {
            return Err(AppError::ValidationError(
                "Only pending appointments can be confirmed".to_string(),
            ));
        }
        let user_id = appointment.user_id;
        let starts_at = appointment.starts_at;
        let mut model = appointment.into_active_model();
        model.status = Set(AppointmentStatus::Confirmed);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Appointment,
                "Appointment confirmed",
                &format!(
                    "Your appointment on {} is confirmed.",
                    starts_at.format("%Y-%m-%d %H:%M")
                ),
            )
            .await;

        Ok(AppointmentResponse::from(updated))
    }

    pub async fn complete(&self, appointment_id: i64) -> AppResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if appointment.status != AppointmentStatus::Confirmed {
            return Err(AppError::ValidationError(
                "Only confirmed appointments can be completed".to_string(),
            ));
        }
        let snapshot = appointment.clone();
        let mut model = appointment.into_active_model();
        model.status = Set(AppointmentStatus::Completed);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        if snapshot.paid_by_course {
            self.course_service
                .complete_session_for_appointment(appointment_id)
                .await?;
        }

        let _ = self
            .notification_service
            .notify(
                snapshot.user_id,
                NotificationKind::Appointment,
                "Thanks for your visit",
                "Your appointment is complete. We would love to hear your review!",
            )
            .await;

        Ok(AppointmentResponse::from(updated))
    }

    pub async fn mark_no_show(&self, appointment_id: i64) -> AppResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if !matches!(
            appointment.status,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        ) {
            return Err(AppError::ValidationError(
                "Appointment cannot be marked as no-show".to_string(),
            ));
        }
        let paid_by_course = appointment.paid_by_course;
        let mut model = appointment.into_active_model();
        model.status = Set(AppointmentStatus::NoShow);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        // The sitting is forfeited, not consumed; the lifecycle task reports
        // it in the overdue bucket.
        if paid_by_course {
            self.course_service
                .mark_session_overdue_for_appointment(appointment_id)
                .await?;
        }

        Ok(AppointmentResponse::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cancellable_cutoff() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let soon = Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();

        assert!(!cancellable(now, soon, 24)); // 23h away
        assert!(cancellable(now, later, 24)); // exactly 24h away
        assert!(cancellable(now, later, 0));
    }

    #[test]
    fn test_cancellable_past_start() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        assert!(!cancellable(now, past, 0));
    }
}
