use crate::entities::{
    CourseStatus, NotificationKind, PaymentMethod, SessionStatus,
    course_entity as courses, course_service_entity as course_services,
    package_entity as packages, package_service_entity as package_services,
    session_entity as sessions,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{NotificationService, PaymentService};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// A course is complete once every constituent has consumed its sessions.
fn course_is_complete(progress: &[(i32, i32)]) -> bool {
    !progress.is_empty()
        && progress
            .iter()
            .all(|(total, completed)| completed >= total)
}

#[derive(Clone)]
pub struct CourseService {
    pool: DatabaseConnection,
    payment_service: PaymentService,
    notification_service: NotificationService,
}

impl CourseService {
    pub fn new(
        pool: DatabaseConnection,
        payment_service: PaymentService,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            pool,
            payment_service,
            notification_service,
        }
    }

    // ------------------------------------------------------------------
    // Packages (catalog)
    // ------------------------------------------------------------------

    pub async fn list_packages(&self, include_inactive: bool) -> AppResult<Vec<PackageResponse>> {
        let mut finder = packages::Entity::find();
        if !include_inactive {
            finder = finder.filter(packages::Column::IsActive.eq(true));
        }
        let models = finder
            .order_by_asc(packages::Column::Name)
            .all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for package in models {
            let constituents = self.package_constituents(package.id).await?;
            out.push(PackageResponse::new(package, constituents));
        }
        Ok(out)
    }

    pub async fn get_package(&self, package_id: i64) -> AppResult<PackageResponse> {
        let package = packages::Entity::find_by_id(package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment package not found".to_string()))?;
        let constituents = self.package_constituents(package.id).await?;
        Ok(PackageResponse::new(package, constituents))
    }

    async fn package_constituents(
        &self,
        package_id: i64,
    ) -> AppResult<Vec<package_services::Model>> {
        Ok(package_services::Entity::find()
            .filter(package_services::Column::PackageId.eq(package_id))
            .order_by_asc(package_services::Column::Position)
            .all(&self.pool)
            .await?)
    }

    pub async fn create_package(&self, req: CreatePackageRequest) -> AppResult<PackageResponse> {
        if req.price_cents <= 0 {
            return Err(AppError::ValidationError(
                "Package price must be positive".to_string(),
            ));
        }
        if req.validity_days <= 0 {
            return Err(AppError::ValidationError(
                "Package validity must be positive".to_string(),
            ));
        }
        if req.services.is_empty() {
            return Err(AppError::ValidationError(
                "Package needs at least one service".to_string(),
            ));
        }
        for constituent in &req.services {
            if constituent.sessions_per_service <= 0 {
                return Err(AppError::ValidationError(
                    "Sessions per service must be positive".to_string(),
                ));
            }
            let service = crate::entities::service_entity::Entity::find_by_id(
                constituent.service_id,
            )
            .one(&self.pool)
            .await?;
            if service.is_none() {
                return Err(AppError::NotFound(format!(
                    "Service {} not found",
                    constituent.service_id
                )));
            }
        }

        let txn = self.pool.begin().await?;

        let package = packages::ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            price_cents: Set(req.price_cents),
            validity_days: Set(req.validity_days),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (index, constituent) in req.services.iter().enumerate() {
            package_services::ActiveModel {
                package_id: Set(package.id),
                service_id: Set(constituent.service_id),
                position: Set(constituent.position.unwrap_or(index as i32)),
                sessions_per_service: Set(constituent.sessions_per_service),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        let constituents = self.package_constituents(package.id).await?;
        Ok(PackageResponse::new(package, constituents))
    }

    pub async fn update_package(
        &self,
        package_id: i64,
        req: UpdatePackageRequest,
    ) -> AppResult<PackageResponse> {
        if let Some(price) = req.price_cents
            && price <= 0
        {
            return Err(AppError::ValidationError(
                "Package price must be positive".to_string(),
            ));
        }

        let mut model = packages::Entity::find_by_id(package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment package not found".to_string()))?
            .into_active_model();
        if let Some(name) = req.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(price) = req.price_cents {
            model.price_cents = Set(price);
        }
        if let Some(validity) = req.validity_days {
            model.validity_days = Set(validity);
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;

        let constituents = self.package_constituents(updated.id).await?;
        Ok(PackageResponse::new(updated, constituents))
    }

    // ------------------------------------------------------------------
    // Enrollment
    // ------------------------------------------------------------------

    /// Create the course shell (progress rows copied from the package) and
    /// run the payment leg. Wallet payments activate the course before this
    /// returns; card payments leave it pending until the intent settles.
    pub async fn enroll(
        &self,
        user_id: i64,
        req: EnrollCourseRequest,
    ) -> AppResult<EnrollCourseResponse> {
        let package = packages::Entity::find_by_id(req.package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment package not found".to_string()))?;
        if !package.is_active {
            return Err(AppError::ValidationError(
                "Treatment package is not available".to_string(),
            ));
        }

        let constituents = self.package_constituents(package.id).await?;
        if constituents.is_empty() {
            return Err(AppError::ValidationError(
                "Treatment package has no services".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let course = courses::ActiveModel {
            user_id: Set(user_id),
            package_id: Set(package.id),
            status: Set(CourseStatus::PendingPayment),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for constituent in &constituents {
            course_services::ActiveModel {
                course_id: Set(course.id),
                service_id: Set(constituent.service_id),
                position: Set(constituent.position),
                sessions_total: Set(constituent.sessions_per_service),
                sessions_completed: Set(0),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        let payment_result = self
            .payment_service
            .pay_course(
                user_id,
                course.id,
                package.price_cents,
                req.method.clone(),
                req.promotion_code.as_deref(),
            )
            .await;

        let (_payment, intent) = match payment_result {
            Ok(result) => result,
            Err(e) => {
                // Failed payment leg leaves no orphaned pending course
                let mut model = course.into_active_model();
                model.status = Set(CourseStatus::Cancelled);
                model.update(&self.pool).await?;
                return Err(e);
            }
        };

        // Wallet enrollments are active at this point; reload for the
        // response either way.
        let course = self.load_course(course.id).await?;
        let progress = self.course_progress(course.id).await?;

        if req.method == PaymentMethod::Wallet {
            log::info!(
                "User {user_id} enrolled in package {} (course {})",
                package.id,
                course.id
            );
        }

        Ok(EnrollCourseResponse {
            course: CourseResponse::new(course, progress),
            payment_intent: intent,
        })
    }

    async fn load_course(&self, course_id: i64) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment course not found".to_string()))
    }

    async fn course_progress(&self, course_id: i64) -> AppResult<Vec<course_services::Model>> {
        Ok(course_services::Entity::find()
            .filter(course_services::Column::CourseId.eq(course_id))
            .order_by_asc(course_services::Column::Position)
            .all(&self.pool)
            .await?)
    }

    pub async fn get_my_courses(&self, user_id: i64) -> AppResult<Vec<CourseResponse>> {
        let models = courses::Entity::find()
            .filter(courses::Column::UserId.eq(user_id))
            .order_by_desc(courses::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for course in models {
            let progress = self.course_progress(course.id).await?;
            out.push(CourseResponse::new(course, progress));
        }
        Ok(out)
    }

    pub async fn get_course(&self, user_id: i64, course_id: i64) -> AppResult<CourseResponse> {
        let course = self.load_course(course_id).await?;
        if course.user_id != user_id {
            return Err(AppError::NotFound("Treatment course not found".to_string()));
        }
        let progress = self.course_progress(course.id).await?;
        Ok(CourseResponse::new(course, progress))
    }

    /// Booked sittings of an owned course, newest first.
    pub async fn list_sessions(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<SessionResponse>> {
        let course = self.load_course(course_id).await?;
        if course.user_id != user_id {
            return Err(AppError::NotFound("Treatment course not found".to_string()));
        }
        let models = sessions::Entity::find()
            .filter(sessions::Column::CourseId.eq(course_id))
            .order_by_desc(sessions::Column::ScheduledAt)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(SessionResponse::from).collect())
    }

    // ------------------------------------------------------------------
    // Session consumption (called from the booking flow)
    // ------------------------------------------------------------------

    /// Check that the course is usable for this service and has sessions
    /// left, counting already-scheduled ones so a customer cannot book more
    /// sittings than the package grants.
    pub async fn find_consumable(
        &self,
        user_id: i64,
        course_id: i64,
        service_id: i64,
    ) -> AppResult<(courses::Model, course_services::Model)> {
        let course = self.load_course(course_id).await?;
        if course.user_id != user_id {
            return Err(AppError::NotFound("Treatment course not found".to_string()));
        }
        if course.status != CourseStatus::Active {
            return Err(AppError::ValidationError(
                "Treatment course is not active".to_string(),
            ));
        }
        if let Some(expires_at) = course.expires_at
            && expires_at < Utc::now()
        {
            return Err(AppError::ValidationError(
                "Treatment course has expired".to_string(),
            ));
        }

        let course_service = course_services::Entity::find()
            .filter(course_services::Column::CourseId.eq(course_id))
            .filter(course_services::Column::ServiceId.eq(service_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::ValidationError("Service is not part of this course".to_string())
            })?;

        let scheduled = sessions::Entity::find()
            .filter(sessions::Column::CourseServiceId.eq(course_service.id))
            .filter(sessions::Column::Status.eq(SessionStatus::Scheduled))
            .count(&self.pool)
            .await? as i32;

        if course_service.sessions_completed + scheduled >= course_service.sessions_total {
            return Err(AppError::ValidationError(
                "No sessions remaining for this service".to_string(),
            ));
        }

        Ok((course, course_service))
    }

    pub async fn create_session(
        &self,
        course_id: i64,
        course_service_id: i64,
        appointment_id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> AppResult<sessions::Model> {
        let session = sessions::ActiveModel {
            course_id: Set(course_id),
            course_service_id: Set(course_service_id),
            appointment_id: Set(Some(appointment_id)),
            status: Set(SessionStatus::Scheduled),
            scheduled_at: Set(scheduled_at),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(session)
    }

    async fn session_for_appointment(
        &self,
        appointment_id: i64,
    ) -> AppResult<Option<sessions::Model>> {
        Ok(sessions::Entity::find()
            .filter(sessions::Column::AppointmentId.eq(appointment_id))
            .one(&self.pool)
            .await?)
    }

    /// Cancelled bookings hand the session back to the course.
    pub async fn release_session_for_appointment(&self, appointment_id: i64) -> AppResult<()> {
        if let Some(session) = self.session_for_appointment(appointment_id).await?
            && session.status == SessionStatus::Scheduled
        {
            let mut model = session.into_active_model();
            model.status = Set(SessionStatus::Cancelled);
            model.update(&self.pool).await?;
        }
        Ok(())
    }

    /// No-shows forfeit the sitting without counting it as progress.
    pub async fn mark_session_overdue_for_appointment(
        &self,
        appointment_id: i64,
    ) -> AppResult<()> {
        if let Some(session) = self.session_for_appointment(appointment_id).await?
            && session.status == SessionStatus::Scheduled
        {
            let mut model = session.into_active_model();
            model.status = Set(SessionStatus::Overdue);
            model.update(&self.pool).await?;
        }
        Ok(())
    }

    /// Completing the appointment completes the session and advances the
    /// per-service progress; the course flips to completed when the last
    /// constituent finishes.
    pub async fn complete_session_for_appointment(&self, appointment_id: i64) -> AppResult<()> {
        let Some(session) = self.session_for_appointment(appointment_id).await? else {
            return Ok(());
        };
        if session.status != SessionStatus::Scheduled {
            return Ok(());
        }

        let course_id = session.course_id;
        let course_service_id = session.course_service_id;

        let mut model = session.into_active_model();
        model.status = Set(SessionStatus::Completed);
        model.completed_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        let course_service = course_services::Entity::find_by_id(course_service_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course service not found".to_string()))?;
        let completed = course_service.sessions_completed + 1;
        let mut cs_model = course_service.into_active_model();
        cs_model.sessions_completed = Set(completed);
        cs_model.update(&self.pool).await?;

        self.complete_course_if_done(course_id).await?;
        Ok(())
    }

    async fn complete_course_if_done(&self, course_id: i64) -> AppResult<bool> {
        let course = self.load_course(course_id).await?;
        if course.status != CourseStatus::Active {
            return Ok(false);
        }
        let progress = self.course_progress(course_id).await?;
        let pairs: Vec<(i32, i32)> = progress
            .iter()
            .map(|row| (row.sessions_total, row.sessions_completed))
            .collect();
        if !course_is_complete(&pairs) {
            return Ok(false);
        }

        let user_id = course.user_id;
        let mut model = course.into_active_model();
        model.status = Set(CourseStatus::Completed);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Course,
                "Treatment course completed",
                "You have used all sessions of your treatment course. Thank you!",
            )
            .await;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Lifecycle pass (startup + daily)
    // ------------------------------------------------------------------

    /// Idempotent sweep over course state: stale scheduled sessions become
    /// overdue, finished courses complete, active courses past their window
    /// expire.
    pub async fn advance_lifecycle(&self, grace_hours: i64) -> AppResult<LifecycleSummary> {
        let now = Utc::now();
        let mut summary = LifecycleSummary::default();

        // 1. Scheduled sessions whose planned start is past the grace window
        let cutoff = now - Duration::hours(grace_hours);
        let stale = sessions::Entity::find()
            .filter(sessions::Column::Status.eq(SessionStatus::Scheduled))
            .filter(sessions::Column::ScheduledAt.lt(cutoff))
            .all(&self.pool)
            .await?;
        for session in stale {
            let mut model = session.into_active_model();
            model.status = Set(SessionStatus::Overdue);
            model.update(&self.pool).await?;
            summary.overdue_sessions += 1;
        }

        // 2./3. Completion and expiry of active courses
        let active = courses::Entity::find()
            .filter(courses::Column::Status.eq(CourseStatus::Active))
            .all(&self.pool)
            .await?;
        for course in active {
            if self.complete_course_if_done(course.id).await? {
                summary.completed_courses += 1;
                continue;
            }
            if let Some(expires_at) = course.expires_at
                && expires_at < now
            {
                let user_id = course.user_id;
                let mut model = course.into_active_model();
                model.status = Set(CourseStatus::Expired);
                model.updated_at = Set(Some(now));
                model.update(&self.pool).await?;
                summary.expired_courses += 1;

                let _ = self
                    .notification_service
                    .notify(
                        user_id,
                        NotificationKind::Course,
                        "Treatment course expired",
                        "Your treatment course validity period has ended.",
                    )
                    .await;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_is_complete() {
        assert!(course_is_complete(&[(5, 5), (3, 3)]));
        assert!(!course_is_complete(&[(5, 4), (3, 3)]));
        assert!(!course_is_complete(&[(5, 0)]));
        // over-completion still counts as done
        assert!(course_is_complete(&[(5, 6)]));
    }

    #[test]
    fn test_empty_course_is_not_complete() {
        assert!(!course_is_complete(&[]));
    }
}
