use crate::handlers::current_user_id;
use crate::models::*;
use crate::services::ReviewService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "review",
    request_body = CreateReviewRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Appointment not reviewable")
    )
)]
pub async fn create_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match review_service
        .create_review(user_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reviews").route("", web::post().to(create_review)));
}
