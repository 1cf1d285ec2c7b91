use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    AppointmentStatus, CourseStatus, NotificationKind, PaymentMethod, PaymentPurpose,
    PaymentStatus, PromotionKind, SessionStatus, UserRole, WalletTransactionDirection,
    WalletTransactionKind,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::wallet::get_wallet,
        handlers::wallet::create_topup_intent,
        handlers::wallet::confirm_topup,
        handlers::wallet::redeem_points,
        handlers::catalog::list_categories,
        handlers::catalog::list_services,
        handlers::catalog::get_service,
        handlers::catalog::list_service_reviews,
        handlers::catalog::list_staff,
        handlers::catalog::list_packages,
        handlers::catalog::get_package,
        handlers::appointment::book,
        handlers::appointment::list_my,
        handlers::appointment::list_schedule,
        handlers::appointment::get_one,
        handlers::appointment::pay,
        handlers::appointment::cancel,
        handlers::appointment::confirm,
        handlers::appointment::complete,
        handlers::appointment::no_show,
        handlers::payment::list_payments,
        handlers::payment::confirm_payment,
        handlers::promotion::validate,
        handlers::review::create_review,
        handlers::notification::list_notifications,
        handlers::notification::mark_read,
        handlers::notification::mark_all_read,
        handlers::course::enroll,
        handlers::course::list_my_courses,
        handlers::course::get_course,
        handlers::admin::get_stats,
        handlers::admin::list_users,
        handlers::admin::update_user_role,
        handlers::admin::advance_course_lifecycle,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            UserResponse,
            UserStatistics,
            AuthResponse,
            UpdateUserRoleRequest,
            StaffResponse,
            UserRole,
            WalletResponse,
            WalletTransactionResponse,
            WalletTransactionDirection,
            WalletTransactionKind,
            TopupIntentRequest,
            TopupIntentResponse,
            ConfirmTopupRequest,
            RedeemPointsRequest,
            RedeemPointsResponse,
            CategoryResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            ServiceResponse,
            ServiceDetailResponse,
            CreateServiceRequest,
            UpdateServiceRequest,
            RoomResponse,
            CreateRoomRequest,
            UpdateRoomRequest,
            BookAppointmentRequest,
            AppointmentResponse,
            AppointmentStatus,
            PayAppointmentRequest,
            PaymentResponse,
            PaymentIntentResponse,
            ConfirmPaymentRequest,
            PaymentMethod,
            PaymentPurpose,
            PaymentStatus,
            PromotionResponse,
            CreatePromotionRequest,
            UpdatePromotionRequest,
            PromotionPreviewResponse,
            PromotionKind,
            CreateReviewRequest,
            ReviewResponse,
            NotificationResponse,
            NotificationKind,
            PackageConstituentRequest,
            CreatePackageRequest,
            UpdatePackageRequest,
            PackageServiceResponse,
            PackageResponse,
            EnrollCourseRequest,
            EnrollCourseResponse,
            CourseServiceProgressResponse,
            CourseResponse,
            CourseStatus,
            SessionResponse,
            SessionStatus,
            LifecycleSummary,
            AdminStatsResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "user", description = "User profile API"),
        (name = "wallet", description = "Wallet and loyalty points API"),
        (name = "catalog", description = "Public catalog API"),
        (name = "appointment", description = "Appointment booking API"),
        (name = "payment", description = "Payment API"),
        (name = "promotion", description = "Promotion API"),
        (name = "review", description = "Review API"),
        (name = "notification", description = "Notification API"),
        (name = "course", description = "Treatment course API"),
        (name = "admin", description = "Administration API"),
    ),
    info(
        title = "Serenia Backend API",
        version = "1.0.0",
        description = "Serenia spa management REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
