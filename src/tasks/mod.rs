//! Background scheduled tasks for the application.
//!
//! The one recurring job is the treatment-course lifecycle sweep: stale
//! scheduled sessions become overdue, used-up courses complete, and courses
//! past their validity window expire. Call `spawn_all` once during startup;
//! the sweep runs immediately and then once every 24 hours.

use crate::services::CourseService;

/// Spawn all background tasks.
///
/// Notes
/// - The lifecycle sweep is idempotent, so the startup run plus the daily
///   loop (plus any manual admin trigger) never double-apply a transition.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(course_service: CourseService, session_overdue_grace_hours: i64) {
    tokio::spawn(async move {
        loop {
            match course_service
                .advance_lifecycle(session_overdue_grace_hours)
                .await
            {
                Ok(summary)
                    if summary.overdue_sessions > 0
                        || summary.completed_courses > 0
                        || summary.expired_courses > 0 =>
                {
                    log::info!(
                        "Course lifecycle pass: {} sessions overdue, {} courses completed, {} courses expired",
                        summary.overdue_sessions,
                        summary.completed_courses,
                        summary.expired_courses
                    );
                }
                Ok(_) => {}
                Err(e) => log::error!("Course lifecycle pass failed: {e:?}"),
            }
            tokio::time::sleep(std::time::Duration::from_secs(24 * 3600)).await;
        }
    });
}
