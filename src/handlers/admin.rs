use crate::config::Config;
use crate::handlers::require_admin;
use crate::models::*;
use crate::services::{
    CatalogService, CourseService, PromotionService, ReviewService, RoomService, StatsService,
    UserService,
};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Dashboard counters", body = AdminStatsResponse),
        (status = 403, description = "Not admin")
    )
)]
pub async fn get_stats(
    stats_service: web::Data<StatsService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match stats_service.get_admin_stats().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    params(
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User list"),
        (status = 403, description = "Not admin")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match user_service.list_users(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}/role",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserRoleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 403, description = "Not admin")
    )
)]
pub async fn update_user_role(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRoleRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match user_service
        .update_user_role(path.into_inner(), request.into_inner().role)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/courses/advance-lifecycle",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Lifecycle pass executed", body = LifecycleSummary),
        (status = 403, description = "Not admin")
    )
)]
pub async fn advance_course_lifecycle(
    course_service: web::Data<CourseService>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match course_service
        .advance_lifecycle(config.booking.session_overdue_grace_hours)
        .await
    {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": summary,
            "message": "Lifecycle pass completed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ---------------------------------------------------------------------
// Catalog administration
// ---------------------------------------------------------------------

pub async fn create_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.create_category(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service
        .update_category(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn create_service(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.create_service(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_service(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateServiceRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service
        .update_service(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ---------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------

pub async fn list_rooms(
    room_service: web::Data<RoomService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match room_service.list_rooms(true).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn create_room(
    room_service: web::Data<RoomService>,
    req: HttpRequest,
    request: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match room_service.create_room(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_room(
    room_service: web::Data<RoomService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateRoomRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match room_service
        .update_room(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ---------------------------------------------------------------------
// Treatment packages
// ---------------------------------------------------------------------

pub async fn list_packages(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match course_service.list_packages(true).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn create_package(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
    request: web::Json<CreatePackageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match course_service.create_package(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_package(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdatePackageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match course_service
        .update_package(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ---------------------------------------------------------------------
// Promotions
// ---------------------------------------------------------------------

pub async fn list_promotions(
    promotion_service: web::Data<PromotionService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match promotion_service.list_promotions(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn create_promotion(
    promotion_service: web::Data<PromotionService>,
    req: HttpRequest,
    request: web::Json<CreatePromotionRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match promotion_service.create_promotion(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_promotion(
    promotion_service: web::Data<PromotionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdatePromotionRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match promotion_service
        .update_promotion(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": response }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ---------------------------------------------------------------------
// Review moderation
// ---------------------------------------------------------------------

pub async fn delete_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match review_service.delete_review(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Review deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(get_stats))
            .route("/users", web::get().to(list_users))
            .route("/users/{id}/role", web::put().to(update_user_role))
            .route(
                "/courses/advance-lifecycle",
                web::post().to(advance_course_lifecycle),
            )
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}", web::put().to(update_category))
            .route("/services", web::post().to(create_service))
            .route("/services/{id}", web::put().to(update_service))
            .route("/rooms", web::get().to(list_rooms))
            .route("/rooms", web::post().to(create_room))
            .route("/rooms/{id}", web::put().to(update_room))
            .route("/packages", web::get().to(list_packages))
            .route("/packages", web::post().to(create_package))
            .route("/packages/{id}", web::put().to(update_package))
            .route("/promotions", web::get().to(list_promotions))
            .route("/promotions", web::post().to(create_promotion))
            .route("/promotions/{id}", web::put().to(update_promotion))
            .route("/reviews/{id}", web::delete().to(delete_review)),
    );
}
