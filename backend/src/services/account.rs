//! Account service: registration, login, token refresh, profile edits,
//! and the administrative role/deactivation operations.

use crate::auth::{require_role, AuthUser, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{AccountRecord, AccountRepository, CreateAccount, UpdateAccount};
use crate::services::parse_column;
use fitai_shared::errors::AuthError;
use fitai_shared::models::Role;
use fitai_shared::types::{
    AccountResponse, AuthTokens, RegisterRequest, UpdateAccountRequest,
};
use fitai_shared::validation::{validate_email, validate_password, validate_username};
use sqlx::PgPool;
use uuid::Uuid;

/// Account service
pub struct AccountService;

impl AccountService {
    /// Register a new account; every registration starts as a client.
    ///
    /// Password hashing is offloaded to the blocking thread pool.
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        validate_username(&req.username).map_err(ApiError::Validation)?;
        validate_email(&req.email).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        if AccountRepository::username_exists(pool, &req.username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }
        if AccountRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let account = AccountRepository::create(
            pool,
            CreateAccount {
                username: req.username,
                email: req.email,
                password_hash,
                phone: req.phone,
                birth_date: req.birth_date,
                height_m: req.height_m,
                weight_kg: req.weight_kg,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Self::issue_tokens(jwt, account.id, Role::Client)
    }

    /// Login with username and password; deactivated accounts are rejected
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let account = AccountRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidCredentials.to_string()))?;

        if !account.is_active {
            return Err(ApiError::Unauthorized(
                AuthError::AccountDeactivated.to_string(),
            ));
        }

        let valid =
            PasswordService::verify_async(password.to_string(), account.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::Unauthorized(
                AuthError::InvalidCredentials.to_string(),
            ));
        }

        let role: Role = parse_column(&account.role, "role")?;
        Self::issue_tokens(jwt, account.id, role)
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// The role is re-read from the database so an administrative role
    /// change takes effect at the next refresh.
    pub async fn refresh(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        let account_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid account ID in token".to_string()))?;

        let account = AccountRepository::find_by_id(pool, account_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(AuthError::InvalidToken.to_string()))?;

        if !account.is_active {
            return Err(ApiError::Unauthorized(
                AuthError::AccountDeactivated.to_string(),
            ));
        }

        let role: Role = parse_column(&account.role, "role")?;
        Self::issue_tokens(jwt, account.id, role)
    }

    /// Get the caller's own account
    pub async fn get_account(pool: &PgPool, account_id: Uuid) -> Result<AccountResponse, ApiError> {
        let account = AccountRepository::find_by_id(pool, account_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        Self::to_response(account)
    }

    /// Self-service update of contact/physical attributes; role is never
    /// touched here
    pub async fn update_account(
        pool: &PgPool,
        account_id: Uuid,
        req: UpdateAccountRequest,
    ) -> Result<AccountResponse, ApiError> {
        if let Some(height) = req.height_m {
            if !(0.5..=2.6).contains(&height) {
                return Err(ApiError::Validation(
                    "Height must be between 0.5 and 2.6 meters".to_string(),
                ));
            }
        }
        if let Some(weight) = req.weight_kg {
            if !(20.0..=500.0).contains(&weight) {
                return Err(ApiError::Validation(
                    "Weight must be between 20 and 500 kg".to_string(),
                ));
            }
        }

        let account = AccountRepository::update_contact(
            pool,
            account_id,
            UpdateAccount {
                phone: req.phone,
                birth_date: req.birth_date,
                height_m: req.height_m,
                weight_kg: req.weight_kg,
                profile_picture_url: req.profile_picture_url,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        Self::to_response(account)
    }

    /// Administrative role change (admin only)
    pub async fn set_role(
        pool: &PgPool,
        auth: &AuthUser,
        target_id: Uuid,
        role: Role,
    ) -> Result<AccountResponse, ApiError> {
        require_role(auth, Role::Admin)?;

        let account = AccountRepository::set_role(pool, target_id, role.as_str())
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        Self::to_response(account)
    }

    /// Administrative soft deactivation (admin only)
    pub async fn deactivate(
        pool: &PgPool,
        auth: &AuthUser,
        target_id: Uuid,
    ) -> Result<AccountResponse, ApiError> {
        require_role(auth, Role::Admin)?;

        let account = AccountRepository::deactivate(pool, target_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        Self::to_response(account)
    }

    fn issue_tokens(jwt: &JwtService, account_id: Uuid, role: Role) -> Result<AuthTokens, ApiError> {
        let access_token = jwt
            .generate_access_token(account_id, role)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt
            .generate_refresh_token(account_id, role)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }

    fn to_response(account: AccountRecord) -> Result<AccountResponse, ApiError> {
        let role: Role = parse_column(&account.role, "role")?;
        Ok(AccountResponse {
            id: account.id.to_string(),
            username: account.username,
            email: account.email,
            role,
            phone: account.phone,
            birth_date: account.birth_date,
            height_m: account.height_m,
            weight_kg: account.weight_kg,
            profile_picture_url: account.profile_picture_url,
            is_active: account.is_active,
            created_at: account.created_at,
        })
    }
}
