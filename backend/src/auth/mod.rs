//! Authentication module
//!
//! Provides JWT-based authentication with argon2 password hashing and the
//! role capability check applied at every gated operation's entry.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
pub use password::PasswordService;

use crate::error::ApiError;
use fitai_shared::models::Role;

/// Capability check: require the caller to hold exactly `required`.
///
/// Roles do not imply each other; an admin does not pass a trainer check.
/// Call this at the top of every role-gated operation instead of comparing
/// roles inline.
pub fn require_role(auth: &AuthUser, required: Role) -> Result<(), ApiError> {
    if auth.role == required {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "{} role required",
            required.as_str()
        )))
    }
}
