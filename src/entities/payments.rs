use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_purpose")]
#[serde(rename_all = "snake_case")]
pub enum PaymentPurpose {
    #[sea_orm(string_value = "wallet_topup")]
    WalletTopup,
    #[sea_orm(string_value = "appointment")]
    Appointment,
    #[sea_orm(string_value = "course")]
    Course,
}

impl std::fmt::Display for PaymentPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentPurpose::WalletTopup => write!(f, "wallet_topup"),
            PaymentPurpose::Appointment => write!(f, "appointment"),
            PaymentPurpose::Course => write!(f, "course"),
        }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "wallet")]
    Wallet,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "succeeded")]
    Succeeded,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client-facing payment reference.
    #[sea_orm(unique)]
    pub reference: String,
    pub user_id: i64,
    pub purpose: PaymentPurpose,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Net amount actually charged, after discount.
    pub amount_cents: i64,
    pub discount_cents: i64,
    pub promotion_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub course_id: Option<i64>,
    pub stripe_payment_intent_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
