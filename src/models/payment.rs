use crate::entities::{
    PaymentMethod, PaymentPurpose, PaymentStatus, payment_entity,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub reference: String,
    pub purpose: PaymentPurpose,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount_cents: i64,
    pub discount_cents: i64,
    pub promotion_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub course_id: Option<i64>,
    pub stripe_payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<payment_entity::Model> for PaymentResponse {
    fn from(payment: payment_entity::Model) -> Self {
        Self {
            id: payment.id,
            reference: payment.reference,
            purpose: payment.purpose,
            method: payment.method,
            status: payment.status,
            amount_cents: payment.amount_cents,
            discount_cents: payment.discount_cents,
            promotion_id: payment.promotion_id,
            appointment_id: payment.appointment_id,
            course_id: payment.course_id,
            stripe_payment_intent_id: payment.stripe_payment_intent_id,
            created_at: payment.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Returned whenever a card payment is initiated; the client drives the
/// Stripe confirmation flow with the client secret.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub payment_id: i64,
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_cents: i64,
    pub discount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: String,
}
