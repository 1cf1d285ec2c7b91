use crate::entities::{
    AppointmentStatus, CourseStatus, NotificationKind, PaymentMethod, PaymentPurpose,
    PaymentStatus, WalletTransactionKind, appointment_entity as appointments,
    course_entity as courses, package_entity as packages, payment_entity as payments,
};
use crate::error::{AppError, AppResult};
use crate::external::StripeService;
use crate::models::*;
use crate::services::{NotificationService, PromotionService, WalletService};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// One loyalty point per whole dollar of the net charge.
pub fn points_for_amount(amount_cents: i64) -> i64 {
    if amount_cents <= 0 { 0 } else { amount_cents / 100 }
}

#[derive(Clone)]
pub struct PaymentService {
    pool: DatabaseConnection,
    stripe_service: StripeService,
    wallet_service: WalletService,
    promotion_service: PromotionService,
    notification_service: NotificationService,
}

impl PaymentService {
    pub fn new(
        pool: DatabaseConnection,
        stripe_service: StripeService,
        wallet_service: WalletService,
        promotion_service: PromotionService,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            pool,
            stripe_service,
            wallet_service,
            promotion_service,
            notification_service,
        }
    }

    pub async fn list_payments(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PaymentResponse>> {
        let total = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        let models = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .order_by_desc(payments::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<PaymentResponse> = models.into_iter().map(PaymentResponse::from).collect();

        Ok(PaginatedResponse::from_params(items, params, total))
    }

    // ------------------------------------------------------------------
    // Wallet top-up
    // ------------------------------------------------------------------

    pub async fn create_topup_intent(
        &self,
        user_id: i64,
        req: TopupIntentRequest,
    ) -> AppResult<TopupIntentResponse> {
        if req.amount_cents < 100 {
            return Err(AppError::ValidationError(
                "Minimum top-up is 100 cents".to_string(),
            ));
        }
        if req.amount_cents > 1_000_000 {
            return Err(AppError::ValidationError(
                "Maximum top-up is 1000000 cents".to_string(),
            ));
        }

        let payment_intent = self
            .stripe_service
            .create_payment_intent(
                req.amount_cents,
                user_id,
                "wallet_topup",
                Some(format!("Wallet top-up for user {user_id}")),
            )
            .await?;

        let payment = payments::ActiveModel {
            reference: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            purpose: Set(PaymentPurpose::WalletTopup),
            method: Set(PaymentMethod::Card),
            status: Set(PaymentStatus::Pending),
            amount_cents: Set(req.amount_cents),
            discount_cents: Set(0),
            stripe_payment_intent_id: Set(Some(payment_intent.id.to_string())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(TopupIntentResponse {
            payment_id: payment.id,
            payment_intent_id: payment_intent.id.to_string(),
            client_secret: payment_intent.client_secret.clone().unwrap_or_default(),
            amount_cents: req.amount_cents,
        })
    }

    // ------------------------------------------------------------------
    // Appointment payment
    // ------------------------------------------------------------------

    /// Pay for a pending appointment. Wallet payments settle immediately;
    /// card payments return an intent for the client to confirm.
    pub async fn pay_appointment(
        &self,
        user_id: i64,
        appointment_id: i64,
        req: PayAppointmentRequest,
    ) -> AppResult<(PaymentResponse, Option<PaymentIntentResponse>)> {
        let appointment = appointments::Entity::find_by_id(appointment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.user_id != user_id {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }
        if appointment.paid_by_course {
            return Err(AppError::ValidationError(
                "Appointment is covered by a treatment course".to_string(),
            ));
        }
        if appointment.status != AppointmentStatus::Pending {
            return Err(AppError::ValidationError(
                "Appointment is not awaiting payment".to_string(),
            ));
        }

        let existing = payments::Entity::find()
            .filter(payments::Column::AppointmentId.eq(appointment_id))
            .filter(payments::Column::Status.is_in([
                PaymentStatus::Pending,
                PaymentStatus::Succeeded,
            ]))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Appointment already has a payment in progress".to_string(),
            ));
        }

        let gross = appointment.price_cents;
        let (promotion_id, discount) = match req.promotion_code.as_deref() {
            Some(code) => {
                let (promotion, discount) =
                    self.promotion_service.validate_code(code, gross).await?;
                (Some(promotion.id), discount)
            }
            None => (None, 0),
        };
        let net = gross - discount;

        match req.method {
            PaymentMethod::Wallet => {
                let payment = payments::ActiveModel {
                    reference: Set(Uuid::new_v4().to_string()),
                    user_id: Set(user_id),
                    purpose: Set(PaymentPurpose::Appointment),
                    method: Set(PaymentMethod::Wallet),
                    status: Set(PaymentStatus::Pending),
                    amount_cents: Set(net),
                    discount_cents: Set(discount),
                    promotion_id: Set(promotion_id),
                    appointment_id: Set(Some(appointment_id)),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;

                if let Err(e) = self
                    .wallet_service
                    .debit(
                        user_id,
                        net,
                        WalletTransactionKind::Payment,
                        Some(payment.id),
                        "Appointment payment",
                    )
                    .await
                {
                    // a stuck pending row would block every retry
                    let mut model = payment.into_active_model();
                    model.status = Set(PaymentStatus::Failed);
                    model.update(&self.pool).await?;
                    return Err(e);
                }

                let payment = self.settle_payment(payment).await?;
                Ok((PaymentResponse::from(payment), None))
            }
            PaymentMethod::Card => {
                let payment_intent = self
                    .stripe_service
                    .create_payment_intent(
                        net,
                        user_id,
                        "appointment",
                        Some(format!("Appointment {appointment_id} payment")),
                    )
                    .await?;

                let payment = payments::ActiveModel {
                    reference: Set(Uuid::new_v4().to_string()),
                    user_id: Set(user_id),
                    purpose: Set(PaymentPurpose::Appointment),
                    method: Set(PaymentMethod::Card),
                    status: Set(PaymentStatus::Pending),
                    amount_cents: Set(net),
                    discount_cents: Set(discount),
                    promotion_id: Set(promotion_id),
                    appointment_id: Set(Some(appointment_id)),
                    stripe_payment_intent_id: Set(Some(payment_intent.id.to_string())),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;

                let intent = PaymentIntentResponse {
                    payment_id: payment.id,
                    payment_intent_id: payment_intent.id.to_string(),
                    client_secret: payment_intent.client_secret.clone().unwrap_or_default(),
                    amount_cents: net,
                    discount_cents: discount,
                };
                Ok((PaymentResponse::from(payment), Some(intent)))
            }
        }
    }

    // ------------------------------------------------------------------
    // Course purchase
    // ------------------------------------------------------------------

    /// Payment leg of a course enrollment; the course row already exists in
    /// `pending_payment`.
    pub async fn pay_course(
        &self,
        user_id: i64,
        course_id: i64,
        package_price_cents: i64,
        method: PaymentMethod,
        promotion_code: Option<&str>,
    ) -> AppResult<(PaymentResponse, Option<PaymentIntentResponse>)> {
        let gross = package_price_cents;
        let (promotion_id, discount) = match promotion_code {
            Some(code) => {
                let (promotion, discount) =
                    self.promotion_service.validate_code(code, gross).await?;
                (Some(promotion.id), discount)
            }
            None => (None, 0),
        };
        let net = gross - discount;

        match method {
            PaymentMethod::Wallet => {
                let payment = payments::ActiveModel {
                    reference: Set(Uuid::new_v4().to_string()),
                    user_id: Set(user_id),
                    purpose: Set(PaymentPurpose::Course),
                    method: Set(PaymentMethod::Wallet),
                    status: Set(PaymentStatus::Pending),
                    amount_cents: Set(net),
                    discount_cents: Set(discount),
                    promotion_id: Set(promotion_id),
                    course_id: Set(Some(course_id)),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;

                if let Err(e) = self
                    .wallet_service
                    .debit(
                        user_id,
                        net,
                        WalletTransactionKind::Payment,
                        Some(payment.id),
                        "Treatment course purchase",
                    )
                    .await
                {
                    let mut model = payment.into_active_model();
                    model.status = Set(PaymentStatus::Failed);
                    model.update(&self.pool).await?;
                    return Err(e);
                }

                let payment = self.settle_payment(payment).await?;
                Ok((PaymentResponse::from(payment), None))
            }
            PaymentMethod::Card => {
                let payment_intent = self
                    .stripe_service
                    .create_payment_intent(
                        net,
                        user_id,
                        "course",
                        Some(format!("Treatment course {course_id} purchase")),
                    )
                    .await?;

                let payment = payments::ActiveModel {
                    reference: Set(Uuid::new_v4().to_string()),
                    user_id: Set(user_id),
                    purpose: Set(PaymentPurpose::Course),
                    method: Set(PaymentMethod::Card),
                    status: Set(PaymentStatus::Pending),
                    amount_cents: Set(net),
                    discount_cents: Set(discount),
                    promotion_id: Set(promotion_id),
                    course_id: Set(Some(course_id)),
                    stripe_payment_intent_id: Set(Some(payment_intent.id.to_string())),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;

                let intent = PaymentIntentResponse {
                    payment_id: payment.id,
                    payment_intent_id: payment_intent.id.to_string(),
                    client_secret: payment_intent.client_secret.clone().unwrap_or_default(),
                    amount_cents: net,
                    discount_cents: discount,
                };
                Ok((PaymentResponse::from(payment), Some(intent)))
            }
        }
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Client-driven confirmation: check with Stripe, then run the same
    /// finalization the webhook would.
    pub async fn confirm_payment(
        &self,
        user_id: i64,
        payment_intent_id: &str,
    ) -> AppResult<PaymentResponse> {
        let payment = self.find_by_intent(payment_intent_id).await?;
        if payment.user_id != user_id {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }

        let payment_intent = self
            .stripe_service
            .retrieve_payment_intent(payment_intent_id)
            .await?;
        if payment_intent.status != stripe::PaymentIntentStatus::Succeeded {
            return Err(AppError::ValidationError(
                "Payment not successful".to_string(),
            ));
        }

        let payment = self.finalize_payment_succeeded(payment_intent_id).await?;
        Ok(PaymentResponse::from(payment))
    }

    /// Idempotent: re-running for an already settled intent is a no-op.
    pub async fn finalize_payment_succeeded(
        &self,
        payment_intent_id: &str,
    ) -> AppResult<payments::Model> {
        let payment = self.find_by_intent(payment_intent_id).await?;
        if payment.status == PaymentStatus::Succeeded {
            return Ok(payment);
        }
        if payment.status != PaymentStatus::Pending {
            return Err(AppError::ValidationError(format!(
                "Payment {} is not pending",
                payment.id
            )));
        }
        self.settle_payment(payment).await
    }

    pub async fn mark_payment_failed(&self, payment_intent_id: &str) -> AppResult<()> {
        let payment = self.find_by_intent(payment_intent_id).await?;
        if payment.status != PaymentStatus::Pending {
            return Ok(());
        }
        let mut model = payment.into_active_model();
        model.status = Set(PaymentStatus::Failed);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;
        Ok(())
    }

    async fn find_by_intent(&self, payment_intent_id: &str) -> AppResult<payments::Model> {
        payments::Entity::find()
            .filter(payments::Column::StripePaymentIntentId.eq(payment_intent_id.to_string()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
    }

    /// Mark the payment succeeded and apply its purpose-specific effect:
    /// topups credit the wallet, appointment payments confirm the booking,
    /// course payments activate the course. Points accrue on service
    /// payments, not on topups.
    async fn settle_payment(&self, payment: payments::Model) -> AppResult<payments::Model> {
        let snapshot = payment.clone();
        let mut model = payment.into_active_model();
        model.status = Set(PaymentStatus::Succeeded);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        if let Some(promotion_id) = snapshot.promotion_id {
            self.promotion_service.mark_used(promotion_id).await?;
        }

        match snapshot.purpose {
            PaymentPurpose::WalletTopup => {
                self.wallet_service
                    .credit(
                        snapshot.user_id,
                        snapshot.amount_cents,
                        0,
                        WalletTransactionKind::Topup,
                        Some(snapshot.id),
                        "Wallet top-up",
                    )
                    .await?;
                let _ = self
                    .notification_service
                    .notify(
                        snapshot.user_id,
                        NotificationKind::Payment,
                        "Top-up received",
                        &format!("{} cents were added to your wallet.", snapshot.amount_cents),
                    )
                    .await;
            }
            PaymentPurpose::Appointment => {
                if let Some(appointment_id) = snapshot.appointment_id {
                    self.confirm_appointment(appointment_id).await?;
                }
                self.wallet_service
                    .award_points(
                        snapshot.user_id,
                        points_for_amount(snapshot.amount_cents),
                        Some(snapshot.id),
                    )
                    .await?;
            }
            PaymentPurpose::Course => {
                if let Some(course_id) = snapshot.course_id {
                    self.activate_course(course_id).await?;
                }
                self.wallet_service
                    .award_points(
                        snapshot.user_id,
                        points_for_amount(snapshot.amount_cents),
                        Some(snapshot.id),
                    )
                    .await?;
            }
        }

        Ok(updated)
    }

    async fn confirm_appointment(&self, appointment_id: i64) -> AppResult<()> {
        let appointment = appointments::Entity::find_by_id(appointment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.status != AppointmentStatus::Pending {
            return Ok(());
        }
        let user_id = appointment.user_id;
        let starts_at = appointment.starts_at;
        let mut model = appointment.into_active_model();
        model.status = Set(AppointmentStatus::Confirmed);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Appointment,
                "Appointment confirmed",
                &format!("Your appointment on {} is confirmed.", starts_at.format("%Y-%m-%d %H:%M")),
            )
            .await;
        Ok(())
    }

    async fn activate_course(&self, course_id: i64) -> AppResult<()> {
        let course = courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment course not found".to_string()))?;

        if course.status != CourseStatus::PendingPayment {
            return Ok(());
        }

        let package = packages::Entity::find_by_id(course.package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment package not found".to_string()))?;

        let user_id = course.user_id;
        let now = Utc::now();
        let mut model = course.into_active_model();
        model.status = Set(CourseStatus::Active);
        model.activated_at = Set(Some(now));
        model.expires_at = Set(Some(now + Duration::days(package.validity_days as i64)));
        model.updated_at = Set(Some(now));
        model.update(&self.pool).await?;

        let _ = self
            .notification_service
            .notify(
                user_id,
                NotificationKind::Course,
                "Treatment course activated",
                &format!("Your course \"{}\" is now active.", package.name),
            )
            .await;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Refunds
    // ------------------------------------------------------------------

    /// Refund the succeeded payment of a cancelled appointment back to the
    /// wallet. Returns false when there was nothing to refund.
    pub async fn refund_appointment_payment(&self, appointment_id: i64) -> AppResult<bool> {
        let payment = payments::Entity::find()
            .filter(payments::Column::AppointmentId.eq(appointment_id))
            .filter(payments::Column::Status.eq(PaymentStatus::Succeeded))
            .one(&self.pool)
            .await?;

        let Some(payment) = payment else {
            return Ok(false);
        };

        let snapshot = payment.clone();
        let mut model = payment.into_active_model();
        model.status = Set(PaymentStatus::Refunded);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        self.wallet_service
            .credit(
                snapshot.user_id,
                snapshot.amount_cents,
                0,
                WalletTransactionKind::Refund,
                Some(snapshot.id),
                "Appointment cancellation refund",
            )
            .await?;

        let _ = self
            .notification_service
            .notify(
                snapshot.user_id,
                NotificationKind::Payment,
                "Refund issued",
                &format!(
                    "{} cents were refunded to your wallet.",
                    snapshot.amount_cents
                ),
            )
            .await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_amount() {
        assert_eq!(points_for_amount(0), 0);
        assert_eq!(points_for_amount(99), 0);
        assert_eq!(points_for_amount(100), 1);
        assert_eq!(points_for_amount(9050), 90);
        assert_eq!(points_for_amount(-500), 0);
    }
}
