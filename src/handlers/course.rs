use crate::handlers::current_user_id;
use crate::models::*;
use crate::services::CourseService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/courses/enroll",
    tag = "course",
    request_body = EnrollCourseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Enrollment created", body = EnrollCourseResponse),
        (status = 400, description = "Package not available or payment failed")
    )
)]
pub async fn enroll(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
    request: web::Json<EnrollCourseRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match course_service.enroll(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "course",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Own treatment courses with progress")
    )
)]
pub async fn list_my_courses(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match course_service.get_my_courses(user_id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": courses
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "course",
    params(
        ("id" = i64, Path, description = "Course id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Course detail", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    course_service: web::Data<CourseService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);
    let course_id = path.into_inner();

    let course = match course_service.get_course(user_id, course_id).await {
        Ok(course) => course,
        Err(e) => return Ok(e.error_response()),
    };
    match course_service.list_sessions(user_id, course_id).await {
        Ok(sessions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "course": course,
                "sessions": sessions
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn course_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("/enroll", web::post().to(enroll))
            .route("", web::get().to(list_my_courses))
            .route("/{id}", web::get().to(get_course)),
    );
}
