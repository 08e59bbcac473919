//! JWT token generation and validation
//!
//! Provides access and refresh token management with pre-computed keys.
//! Tokens carry the account role so role-gated handlers never hit the
//! database just to check a capability.

use anyhow::Result;
use chrono::{Duration, Utc};
use fitai_shared::errors::AuthError;
use fitai_shared::models::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account role at token issue time
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

/// Pre-computed JWT keys for efficient token operations
///
/// Derived once at startup and cached in AppState.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
///
/// Uses pre-computed keys wrapped in Arc for cheap cloning; create once at
/// startup, never per-request.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }

    /// Generate an access token for an account
    pub fn generate_access_token(&self, account_id: Uuid, role: Role) -> Result<String> {
        self.generate_token(account_id, role, "access", self.access_token_expiry_secs)
    }

    /// Generate a refresh token for an account
    pub fn generate_refresh_token(&self, account_id: Uuid, role: Role) -> Result<String> {
        self.generate_token(account_id, role, "refresh", self.refresh_token_expiry_secs)
    }

    fn generate_token(
        &self,
        account_id: Uuid,
        role: Role,
        token_type: &str,
        expiry_secs: i64,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: account_id.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type, e))
    }

    /// Validate a token and return claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }

    /// Validate an access token specifically
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != "access" {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validate a refresh token specifically
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != "refresh" {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Get access token expiry in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let service = create_test_service();
        let account_id = Uuid::new_v4();

        let token = service
            .generate_access_token(account_id, Role::Trainer)
            .unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.role, Role::Trainer);
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = create_test_service();
        let token = service
            .generate_refresh_token(Uuid::new_v4(), Role::Client)
            .unwrap();

        assert!(matches!(
            service.validate_access_token(&token),
            Err(AuthError::InvalidToken)
        ));
        assert!(service.validate_refresh_token(&token).is_ok());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = create_test_service();
        assert!(matches!(
            service.validate_token("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = create_test_service();
        let other = JwtService::new("different-secret", 3600, 604800);
        let token = service
            .generate_access_token(Uuid::new_v4(), Role::Client)
            .unwrap();
        assert!(other.validate_access_token(&token).is_err());
    }
}
