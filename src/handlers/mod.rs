use crate::entities::UserRole;
use crate::error::AppError;
use crate::middlewares::AuthContext;
use actix_web::{HttpMessage, HttpRequest};

pub mod admin;
pub mod appointment;
pub mod auth;
pub mod catalog;
pub mod course;
pub mod notification;
pub mod payment;
pub mod promotion;
pub mod review;
pub mod user;
pub mod wallet;
pub mod webhook;

pub use admin::admin_config;
pub use appointment::appointment_config;
pub use auth::auth_config;
pub use catalog::catalog_config;
pub use course::course_config;
pub use notification::notification_config;
pub use payment::payment_config;
pub use promotion::promotion_config;
pub use review::review_config;
pub use user::user_config;
pub use wallet::wallet_config;
pub use webhook::webhook_config;

/// Caller identity placed in extensions by the auth middleware.
pub fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

pub fn current_user_id(req: &HttpRequest) -> i64 {
    auth_context(req).map(|ctx| ctx.user_id).unwrap_or(0)
}

/// Staff or admin.
pub fn require_staff(req: &HttpRequest) -> Result<AuthContext, AppError> {
    match auth_context(req) {
        Some(ctx) if matches!(ctx.role, UserRole::Staff | UserRole::Admin) => Ok(ctx),
        Some(_) => Err(AppError::PermissionDenied),
        None => Err(AppError::AuthError("Missing access token".to_string())),
    }
}

pub fn require_admin(req: &HttpRequest) -> Result<AuthContext, AppError> {
    match auth_context(req) {
        Some(ctx) if ctx.role == UserRole::Admin => Ok(ctx),
        Some(_) => Err(AppError::PermissionDenied),
        None => Err(AppError::AuthError("Missing access token".to_string())),
    }
}
