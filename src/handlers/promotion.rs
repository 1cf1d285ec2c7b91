use crate::models::*;
use crate::services::PromotionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/promotions/validate",
    tag = "promotion",
    params(
        ("code" = String, Query, description = "Promotion code"),
        ("amount_cents" = i64, Query, description = "Order amount the code would apply to")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Discount preview", body = PromotionPreviewResponse),
        (status = 400, description = "Code not applicable"),
        (status = 404, description = "Code not found")
    )
)]
pub async fn validate(
    promotion_service: web::Data<PromotionService>,
    query: web::Query<ValidatePromotionQuery>,
) -> Result<HttpResponse> {
    match promotion_service
        .preview(&query.code, query.amount_cents)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn promotion_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/promotions").route("/validate", web::get().to(validate)));
}
