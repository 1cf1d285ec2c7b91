use crate::models::*;
use crate::services::{CatalogService, CourseService, ReviewService, UserService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/catalog/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "Active service categories")
    )
)]
pub async fn list_categories(
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse> {
    match catalog_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/services",
    tag = "catalog",
    params(
        ("category_id" = Option<i64>, Query, description = "Filter by category"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Active services")
    )
)]
pub async fn list_services(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ServiceListQuery>,
) -> Result<HttpResponse> {
    match catalog_service.list_services(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/services/{id}",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "Service id")
    ),
    responses(
        (status = 200, description = "Service detail", body = ServiceDetailResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.get_service(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/services/{id}/reviews",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "Service id"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Reviews for the service")
    )
)]
pub async fn list_service_reviews(
    review_service: web::Data<ReviewService>,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match review_service
        .list_for_service(path.into_inner(), &query.into_inner())
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
    get,
    path = "/catalog/staff",
    tag = "catalog",
    responses(
        (status = 200, description = "Bookable staff members")
    )
)]
pub async fn list_staff(user_service: web::Data<UserService>) -> Result<HttpResponse> {
    match user_service.list_staff().await {
        Ok(staff) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": staff
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/packages",
    tag = "catalog",
    responses(
        (status = 200, description = "Active treatment packages")
    )
)]
pub async fn list_packages(course_service: web::Data<CourseService>) -> Result<HttpResponse> {
    match course_service.list_packages(false).await {
        Ok(packages) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": packages
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/catalog/packages/{id}",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "Package id")
    ),
    responses(
        (status = 200, description = "Package detail", body = PackageResponse),
        (status = 404, description = "Package not found")
    )
)]
pub async fn get_package(
    course_service: web::Data<CourseService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match course_service.get_package(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/catalog")
            .route("/categories", web::get().to(list_categories))
            .route("/services", web::get().to(list_services))
            .route("/services/{id}", web::get().to(get_service))
            .route("/services/{id}/reviews", web::get().to(list_service_reviews))
            .route("/staff", web::get().to(list_staff))
            .route("/packages", web::get().to(list_packages))
            .route("/packages/{id}", web::get().to(get_package)),
    );
}
