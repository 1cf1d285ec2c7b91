use crate::error::AppResult;
use crate::external::StripeService;
use crate::services::PaymentService;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use log::{error, info, warn};
use stripe::{Event, EventObject, EventType, PaymentIntent};

/// Stripe webhook entry point; payment state changes land here whether or
/// not the client ever calls the confirm endpoints.
pub async fn stripe_webhook(
    req: HttpRequest,
    body: web::Bytes,
    stripe_service: web::Data<StripeService>,
    payment_service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    let signature = match req.headers().get("stripe-signature") {
        Some(sig) => sig.to_str().unwrap_or(""),
        None => {
            warn!("Missing Stripe-Signature header");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Missing Stripe-Signature header"
            })));
        }
    };

    let payload = std::str::from_utf8(&body).map_err(|_| {
        error!("Invalid UTF-8 in webhook payload");
        actix_web::error::ErrorBadRequest("Invalid payload encoding")
    })?;

    let event = match stripe_service.verify_webhook_signature(payload, signature) {
        Ok(event) => event,
        Err(e) => {
            error!("Webhook signature verification failed: {e}");
            return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid signature"
            })));
        }
    };

    info!(
        "Received Stripe webhook event: {} ({})",
        event.type_, event.id
    );

    match handle_stripe_event(event, &payment_service).await {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "received": true
        }))),
        Err(e) => {
            error!("Failed to process webhook event: {e}");
            // 200 regardless, to keep Stripe from retry-storming; the error
            // is recorded above
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "received": true,
                "error": format!("Processing failed: {}", e)
            })))
        }
    }
}

async fn handle_stripe_event(event: Event, payment_service: &PaymentService) -> AppResult<()> {
    match event.type_ {
        EventType::PaymentIntentSucceeded => {
            if let Some(payment_intent) = extract_payment_intent(event) {
                info!("Payment succeeded for PaymentIntent: {}", payment_intent.id);
                payment_service
                    .finalize_payment_succeeded(payment_intent.id.as_ref())
                    .await?;
            }
            Ok(())
        }
        EventType::PaymentIntentPaymentFailed => {
            if let Some(payment_intent) = extract_payment_intent(event) {
                warn!("Payment failed for PaymentIntent: {}", payment_intent.id);
                payment_service
                    .mark_payment_failed(payment_intent.id.as_ref())
                    .await?;
            }
            Ok(())
        }
        EventType::PaymentIntentCanceled => {
            if let Some(payment_intent) = extract_payment_intent(event) {
                info!("Payment canceled for PaymentIntent: {}", payment_intent.id);
                payment_service
                    .mark_payment_failed(payment_intent.id.as_ref())
                    .await?;
            }
            Ok(())
        }
        _ => {
            info!("Unhandled event type: {:?}", event.type_);
            Ok(())
        }
    }
}

fn extract_payment_intent(event: Event) -> Option<PaymentIntent> {
    match event.data.object {
        EventObject::PaymentIntent(payment_intent) => Some(payment_intent),
        _ => None,
    }
}

pub fn webhook_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/webhook").route("/stripe", web::post().to(stripe_webhook)));
}
