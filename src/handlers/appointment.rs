use crate::handlers::{current_user_id, require_staff};
use crate::models::*;
use crate::services::{AppointmentService, PaymentService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointment",
    request_body = BookAppointmentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Slot not available")
    )
)]
pub async fn book(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    request: web::Json<BookAppointmentRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match appointment_service.book(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointment",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("from" = Option<String>, Query, description = "Start of time window (RFC 3339)"),
        ("to" = Option<String>, Query, description = "End of time window (RFC 3339)"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Own appointments")
    )
)]
pub async fn list_my(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    query: web::Query<AppointmentListQuery>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match appointment_service
        .list_my_appointments(user_id, &query.into_inner())
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
    path = "/appointments/schedule",
    tag = "appointment",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("from" = Option<String>, Query, description = "Start of time window (RFC 3339)"),
        ("to" = Option<String>, Query, description = "End of time window (RFC 3339)"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Full schedule (staff only)"),
        (status = 403, description = "Not staff")
    )
)]
pub async fn list_schedule(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    query: web::Query<AppointmentListQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&req) {
        return Ok(e.error_response());
    }

    match appointment_service.list_schedule(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment detail", body = AppointmentResponse),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_one(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match appointment_service
        .get_appointment(user_id, path.into_inner())
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
    path = "/appointments/{id}/pay",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    request_body = PayAppointmentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment settled or intent created"),
        (status = 400, description = "Appointment not payable")
    )
)]
pub async fn pay(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<PayAppointmentRequest>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match payment_service
        .pay_appointment(user_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok((payment, intent)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "payment": payment,
                "payment_intent": intent
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentResponse),
        (status = 400, description = "Cancellation window passed")
    )
)]
pub async fn cancel(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req);

    match appointment_service.cancel(user_id, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/confirm",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment confirmed (staff)"),
        (status = 403, description = "Not staff")
    )
)]
pub async fn confirm(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&req) {
        return Ok(e.error_response());
    }

    match appointment_service.confirm(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/complete",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment completed (staff)"),
        (status = 403, description = "Not staff")
    )
)]
pub async fn complete(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&req) {
        return Ok(e.error_response());
    }

    match appointment_service.complete(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/no-show",
    tag = "appointment",
    params(
        ("id" = i64, Path, description = "Appointment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment marked as no-show (staff)"),
        (status = 403, description = "Not staff")
    )
)]
pub async fn no_show(
    appointment_service: web::Data<AppointmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&req) {
        return Ok(e.error_response());
    }

    match appointment_service.mark_no_show(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn appointment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/appointments")
            .route("", web::post().to(book))
            .route("", web::get().to(list_my))
            .route("/schedule", web::get().to(list_schedule))
            .route("/{id}", web::get().to(get_one))
            .route("/{id}/pay", web::post().to(pay))
            .route("/{id}/cancel", web::post().to(cancel))
            .route("/{id}/confirm", web::post().to(confirm))
            .route("/{id}/complete", web::post().to(complete))
            .route("/{id}/no-show", web::post().to(no_show)),
    );
}
