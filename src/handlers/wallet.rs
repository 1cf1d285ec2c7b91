use crate::handlers::current_user_id;
use crate::models::*;
use crate::services::{PaymentService, WalletService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/wallet",
    tag = "wallet",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Wallet overview", body = WalletResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_wallet(
    wallet_service: web::Data<WalletService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match wallet_service.get_wallet_overview(user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wallet/topup-intent",
    tag = "wallet",
    request_body = TopupIntentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment intent created", body = TopupIntentResponse),
        (status = 400, description = "Invalid amount")
    )
)]
pub async fn create_topup_intent(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    request: web::Json<TopupIntentRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match payment_service
        .create_topup_intent(user_id, request.into_inner())
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
    path = "/wallet/topup/confirm",
    tag = "wallet",
    request_body = ConfirmTopupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Top-up confirmed"),
        (status = 400, description = "Payment not successful")
    )
)]
pub async fn confirm_topup(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    request: web::Json<ConfirmTopupRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match payment_service
        .confirm_payment(user_id, &request.payment_intent_id)
        .await
    {
        Ok(payment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "payment": payment
            },
            "message": "Top-up confirmed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wallet/redeem-points",
    tag = "wallet",
    request_body = RedeemPointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points redeemed", body = RedeemPointsResponse),
        (status = 400, description = "Not enough points")
    )
)]
pub async fn redeem_points(
    wallet_service: web::Data<WalletService>,
    req: HttpRequest,
    request: web::Json<RedeemPointsRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match wallet_service.redeem_points(user_id, request.points).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wallet_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wallet")
            .route("", web::get().to(get_wallet))
            .route("/topup-intent", web::post().to(create_topup_intent))
            .route("/topup/confirm", web::post().to(confirm_topup))
            .route("/redeem-points", web::post().to(redeem_points)),
    );
}
