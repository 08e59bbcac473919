//! Input validation functions
//!
//! Range and format checks shared by the backend services. Each validator
//! returns a human-readable message on failure; the backend wraps these in
//! its `VALIDATION_ERROR` response.

/// Validate account username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if username.len() > 30 {
        return Err("Username must be at most 30 characters".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap();
    if !username_regex.is_match(username) {
        return Err("Username may only contain letters, digits, '_', '.' and '-'".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    use validator::ValidateEmail;

    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate training frequency in days per week
pub fn validate_training_frequency(days_per_week: i32) -> Result<(), String> {
    if !(1..=7).contains(&days_per_week) {
        return Err("Training frequency must be between 1 and 7 days per week".to_string());
    }
    Ok(())
}

/// Validate prescribed set count for a template exercise
pub fn validate_sets(sets: i32) -> Result<(), String> {
    if sets < 1 {
        return Err("Sets must be at least 1".to_string());
    }
    if sets > 50 {
        return Err("Sets value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate the free-form reps prescription ("8-12", "30 seconds", ...)
pub fn validate_reps(reps: &str) -> Result<(), String> {
    if reps.trim().is_empty() {
        return Err("Reps cannot be empty".to_string());
    }
    if reps.len() > 20 {
        return Err("Reps prescription too long".to_string());
    }
    Ok(())
}

/// Validate rest time between sets, in seconds
pub fn validate_rest_seconds(rest_seconds: i32) -> Result<(), String> {
    if rest_seconds < 0 {
        return Err("Rest time cannot be negative".to_string());
    }
    if rest_seconds > 3600 {
        return Err("Rest time cannot exceed one hour".to_string());
    }
    Ok(())
}

/// Validate load as a percentage of one-rep-max
pub fn validate_load_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Load percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Load percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate template duration estimate, in minutes
pub fn validate_estimated_duration(minutes: i32) -> Result<(), String> {
    if minutes < 1 {
        return Err("Estimated duration must be at least 1 minute".to_string());
    }
    if minutes > 600 {
        return Err("Estimated duration cannot exceed 10 hours".to_string());
    }
    Ok(())
}

/// Validate a recommendation feedback rating (1-5 scale)
pub fn validate_feedback_rating(rating: i32) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err("Feedback rating must be between 1 and 5".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(7, true)]
    #[case(4, true)]
    #[case(0, false)]
    #[case(8, false)]
    #[case(-1, false)]
    fn test_training_frequency_boundaries(#[case] freq: i32, #[case] ok: bool) {
        assert_eq!(validate_training_frequency(freq).is_ok(), ok);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(100.0, true)]
    #[case(85.5, true)]
    #[case(-0.1, false)]
    #[case(100.1, false)]
    #[case(f64::NAN, false)]
    fn test_load_percentage_boundaries(#[case] load: f64, #[case] ok: bool) {
        assert_eq!(validate_load_percentage(load).is_ok(), ok);
    }

    #[rstest]
    #[case(1, true)]
    #[case(5, true)]
    #[case(0, false)]
    #[case(6, false)]
    fn test_feedback_rating_boundaries(#[case] rating: i32, #[case] ok: bool) {
        assert_eq!(validate_feedback_rating(rating).is_ok(), ok);
    }

    #[test]
    fn test_sets_must_be_positive() {
        assert!(validate_sets(1).is_ok());
        assert!(validate_sets(0).is_err());
        assert!(validate_sets(-3).is_err());
    }

    #[test]
    fn test_reps_accepts_free_form() {
        assert!(validate_reps("8-12").is_ok());
        assert!(validate_reps("30 seconds").is_ok());
        assert!(validate_reps("").is_err());
        assert!(validate_reps("   ").is_err());
    }

    #[test]
    fn test_rest_seconds_range() {
        assert!(validate_rest_seconds(0).is_ok());
        assert!(validate_rest_seconds(90).is_ok());
        assert!(validate_rest_seconds(-1).is_err());
    }

    #[test]
    fn test_username_format() {
        assert!(validate_username("carlos.trainer").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// In-range values never fail, out-of-range values always do
            #[test]
            fn prop_frequency_acceptance_matches_range(freq in -20i32..20) {
                prop_assert_eq!(
                    validate_training_frequency(freq).is_ok(),
                    (1..=7).contains(&freq)
                );
            }

            #[test]
            fn prop_rating_acceptance_matches_range(rating in -10i32..10) {
                prop_assert_eq!(
                    validate_feedback_rating(rating).is_ok(),
                    (1..=5).contains(&rating)
                );
            }
        }
    }
}
