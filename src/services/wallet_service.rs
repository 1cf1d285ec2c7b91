use crate::entities::{
    WalletTransactionDirection, WalletTransactionKind, wallet_entity as wallets,
    wallet_transaction_entity as wallet_transactions,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Minimum points per redemption; 1 point converts to 1 cent.
const MIN_REDEEM_POINTS: i64 = 100;

#[derive(Clone)]
pub struct WalletService {
    pool: DatabaseConnection,
}

impl WalletService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_wallet(&self, user_id: i64) -> AppResult<wallets::Model> {
        wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))
    }

    pub async fn get_wallet_overview(&self, user_id: i64) -> AppResult<WalletResponse> {
        let wallet = self.get_wallet(user_id).await?;
        let transactions = wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::WalletId.eq(wallet.id))
            .order_by_desc(wallet_transactions::Column::CreatedAt)
            .limit(20)
            .all(&self.pool)
            .await?;
        Ok(WalletResponse::new(wallet, transactions))
    }

    /// Credit the wallet and write the matching ledger row in one
    /// transaction. `points_delta` may be zero.
    pub async fn credit(
        &self,
        user_id: i64,
        amount_cents: i64,
        points_delta: i64,
        kind: WalletTransactionKind,
        payment_id: Option<i64>,
        note: &str,
    ) -> AppResult<wallets::Model> {
        let txn = self.pool.begin().await?;

        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))?;

        let wallet_id = wallet.id;
        let new_balance = wallet.balance_cents + amount_cents;
        let new_points = wallet.points + points_delta;
        let mut model = wallet.into_active_model();
        model.balance_cents = Set(new_balance);
        model.points = Set(new_points);
        let updated = model.update(&txn).await?;

        wallet_transactions::ActiveModel {
            wallet_id: Set(wallet_id),
            direction: Set(WalletTransactionDirection::Credit),
            kind: Set(kind),
            amount_cents: Set(amount_cents),
            points_delta: Set(points_delta),
            payment_id: Set(payment_id),
            note: Set(Some(note.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Debit the wallet; fails without touching anything when the balance
    /// does not cover the amount.
    pub async fn debit(
        &self,
        user_id: i64,
        amount_cents: i64,
        kind: WalletTransactionKind,
        payment_id: Option<i64>,
        note: &str,
    ) -> AppResult<wallets::Model> {
        let txn = self.pool.begin().await?;

        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))?;

        if wallet.balance_cents < amount_cents {
            return Err(AppError::ValidationError(
                "Insufficient wallet balance".to_string(),
            ));
        }

        let wallet_id = wallet.id;
        let new_balance = wallet.balance_cents - amount_cents;
        let mut model = wallet.into_active_model();
        model.balance_cents = Set(new_balance);
        let updated = model.update(&txn).await?;

        wallet_transactions::ActiveModel {
            wallet_id: Set(wallet_id),
            direction: Set(WalletTransactionDirection::Debit),
            kind: Set(kind),
            amount_cents: Set(amount_cents),
            points_delta: Set(0),
            payment_id: Set(payment_id),
            note: Set(Some(note.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Loyalty points accrual; records a zero-amount ledger row so the
    /// history explains every points movement.
    pub async fn award_points(
        &self,
        user_id: i64,
        points: i64,
        payment_id: Option<i64>,
    ) -> AppResult<()> {
        if points <= 0 {
            return Ok(());
        }
        self.credit(
            user_id,
            0,
            points,
            WalletTransactionKind::Payment,
            payment_id,
            "Loyalty points earned",
        )
        .await?;
        Ok(())
    }

    pub async fn redeem_points(
        &self,
        user_id: i64,
        points: i64,
    ) -> AppResult<RedeemPointsResponse> {
        if points < MIN_REDEEM_POINTS {
            return Err(AppError::ValidationError(format!(
                "Minimum redemption is {MIN_REDEEM_POINTS} points"
            )));
        }

        let txn = self.pool.begin().await?;

        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))?;

        if wallet.points < points {
            return Err(AppError::ValidationError(
                "Insufficient loyalty points".to_string(),
            ));
        }

        let wallet_id = wallet.id;
        let credited_cents = points; // 1 point = 1 cent
        let new_points = wallet.points - points;
        let new_balance = wallet.balance_cents + credited_cents;
        let mut model = wallet.into_active_model();
        model.points = Set(new_points);
        model.balance_cents = Set(new_balance);
        let updated = model.update(&txn).await?;

        wallet_transactions::ActiveModel {
            wallet_id: Set(wallet_id),
            direction: Set(WalletTransactionDirection::Credit),
            kind: Set(WalletTransactionKind::PointsRedeem),
            amount_cents: Set(credited_cents),
            points_delta: Set(-points),
            payment_id: Set(None),
            note: Set(Some("Points redeemed to balance".to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(RedeemPointsResponse {
            redeemed_points: points,
            credited_cents,
            balance_cents: updated.balance_cents,
            points: updated.points,
        })
    }
}
