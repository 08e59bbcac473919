//! Business logic services
//!
//! Services validate input, apply role and ownership checks, and coordinate
//! repositories. Handlers stay thin and services return `ApiError` directly.

pub mod account;
pub mod ai;
pub mod catalog;
pub mod workout;

pub use account::AccountService;
pub use ai::AiService;
pub use catalog::CatalogService;
pub use workout::{TemplateService, UserWorkoutService};

use crate::error::ApiError;
use std::str::FromStr;

/// Parse a text column back into its domain enum.
///
/// Schema CHECK constraints keep stored values inside the enum's range, so
/// a failure here means the database and the code disagree.
pub(crate) fn parse_column<T>(value: &str, column: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Corrupt {column} column: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitai_shared::models::Role;

    #[test]
    fn test_parse_column_valid() {
        let role: Role = parse_column("trainer", "role").unwrap();
        assert_eq!(role, Role::Trainer);
    }

    #[test]
    fn test_parse_column_corrupt_is_internal() {
        let err = parse_column::<Role>("superuser", "role").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
