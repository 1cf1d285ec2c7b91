use crate::entities::{UserRole, user_entity as users, wallet_entity as wallets};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;
        validate_password(&request.password)?;
        validate_display_name(&request.display_name)?;
        if let Some(phone) = &request.phone {
            validate_phone(phone)?;
        }

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        // User and wallet are created together; a user without a wallet
        // breaks every payment path.
        let txn = self.pool.begin().await?;

        let user = users::ActiveModel {
            email: Set(email),
            phone: Set(request.phone),
            display_name: Set(request.display_name.trim().to_string()),
            password_hash: Set(password_hash),
            role: Set(UserRole::Customer),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        wallets::ActiveModel {
            user_id: Set(user.id),
            balance_cents: Set(0),
            points: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        let access_token = self.jwt_service.generate_access_token(user.id, &user.role)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(user.id, &user.role)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?;

        // Same error for unknown email and wrong password
        let user =
            user.ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        let access_token = self.jwt_service.generate_access_token(user.id, &user.role)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(user.id, &user.role)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

        // Role comes from the database, not the old token, so demotions
        // take effect at the next refresh.
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let access_token = self.jwt_service.generate_access_token(user.id, &user.role)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
