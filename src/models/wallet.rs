use crate::entities::{
    WalletTransactionDirection, WalletTransactionKind, wallet_entity, wallet_transaction_entity,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletResponse {
    pub balance_cents: i64,
    pub points: i64,
    pub recent_transactions: Vec<WalletTransactionResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletTransactionResponse {
    pub id: i64,
    pub direction: WalletTransactionDirection,
    pub kind: WalletTransactionKind,
    pub amount_cents: i64,
    pub points_delta: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<wallet_transaction_entity::Model> for WalletTransactionResponse {
    fn from(tx: wallet_transaction_entity::Model) -> Self {
        Self {
            id: tx.id,
            direction: tx.direction,
            kind: tx.kind,
            amount_cents: tx.amount_cents,
            points_delta: tx.points_delta,
            note: tx.note,
            created_at: tx.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl WalletResponse {
    pub fn new(
        wallet: wallet_entity::Model,
        transactions: Vec<wallet_transaction_entity::Model>,
    ) -> Self {
        Self {
            balance_cents: wallet.balance_cents,
            points: wallet.points,
            recent_transactions: transactions
                .into_iter()
                .map(WalletTransactionResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopupIntentRequest {
    #[schema(example = 5000)]
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopupIntentResponse {
    pub payment_id: i64,
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmTopupRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedeemPointsRequest {
    #[schema(example = 500)]
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedeemPointsResponse {
    pub redeemed_points: i64,
    pub credited_cents: i64,
    pub balance_cents: i64,
    pub points: i64,
}
