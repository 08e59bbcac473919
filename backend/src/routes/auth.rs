//! Authentication and account routes
//!
//! Registration, login, token refresh, the caller's own account, and the
//! administrative role/deactivation operations.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use fitai_shared::types::{
    AccountResponse, AuthTokens, ChangeRoleRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, UpdateAccountRequest,
};
use uuid::Uuid;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(get_me).put(update_me))
}

/// Administrative account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/role", put(change_role))
        .route("/:id/deactivate", post(deactivate))
}

/// Register a new account
///
/// POST /api/v1/auth/register
///
/// Every new account starts as a client; role changes are administrative.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = AccountService::register(state.db(), state.jwt(), req).await?;
    Ok(Json(tokens))
}

/// Login with username and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens =
        AccountService::login(state.db(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(tokens))
}

/// Refresh access token
///
/// POST /api/v1/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = AccountService::refresh(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// Get the calling account
///
/// GET /api/v1/auth/me
async fn get_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::get_account(state.db(), auth.account_id).await?;
    Ok(Json(account))
}

/// Update the calling account's contact and physical attributes
///
/// PUT /api/v1/auth/me
async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::update_account(state.db(), auth.account_id, req).await?;
    Ok(Json(account))
}

/// Change an account's role (admin only)
///
/// PUT /api/v1/accounts/:id/role
async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::set_role(state.db(), &auth, id, req.role).await?;
    Ok(Json(account))
}

/// Soft-deactivate an account (admin only)
///
/// POST /api/v1/accounts/:id/deactivate
async fn deactivate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::deactivate(state.db(), &auth, id).await?;
    Ok(Json(account))
}
