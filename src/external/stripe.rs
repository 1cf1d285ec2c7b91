use crate::config::StripeConfig;
use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use stripe::{Client, CreatePaymentIntent, Currency, Event, PaymentIntent, PaymentIntentId, Webhook};

/// Thin wrapper around the Stripe API; everything money-related goes
/// through PaymentIntents.
#[derive(Clone)]
pub struct StripeService {
    client: Client,
    config: StripeConfig,
}

impl StripeService {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(config.secret_key.clone()),
            config,
        }
    }

    /// Create a PaymentIntent carrying `user_id` and `purpose` in its
    /// metadata so the webhook can dispatch without a database lookup.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        user_id: i64,
        purpose: &str,
        description: Option<String>,
    ) -> AppResult<PaymentIntent> {
        let mut params = CreatePaymentIntent::new(amount_cents, Currency::USD);

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), user_id.to_string());
        metadata.insert("purpose".to_string(), purpose.to_string());
        params.metadata = Some(metadata);
        if let Some(desc) = description.as_deref() {
            params.description = Some(desc);
        }

        let payment_intent = PaymentIntent::create(&self.client, params).await?;
        Ok(payment_intent)
    }

    pub async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> AppResult<PaymentIntent> {
        let id: PaymentIntentId = payment_intent_id
            .parse()
            .map_err(|_| AppError::ValidationError("Invalid payment intent id".to_string()))?;
        let payment_intent = PaymentIntent::retrieve(&self.client, &id, &[]).await?;
        Ok(payment_intent)
    }

    pub fn verify_webhook_signature(&self, payload: &str, signature: &str) -> AppResult<Event> {
        Webhook::construct_event(payload, signature, &self.config.webhook_secret)
            .map_err(|e| AppError::AuthError(format!("Invalid webhook signature: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripe_service_creation() {
        let config = StripeConfig {
            secret_key: "sk_test_123".to_string(),
            webhook_secret: "whsec_123".to_string(),
        };
        let service = StripeService::new(config);
        assert!(!service.config.secret_key.is_empty());
    }

    #[test]
    fn test_bad_signature_rejected() {
        let config = StripeConfig {
            secret_key: "sk_test_123".to_string(),
            webhook_secret: "whsec_123".to_string(),
        };
        let service = StripeService::new(config);
        assert!(
            service
                .verify_webhook_signature("{}", "t=0,v1=deadbeef")
                .is_err()
        );
    }
}
