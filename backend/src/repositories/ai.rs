//! Training profile and recommendation repository
//!
//! Profiles are upserted (one row per account); recommendations are an
//! append-only history, touched again only to attach feedback.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Training profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub primary_goal: String,
    pub experience_level: String,
    pub training_frequency: i32,
    pub available_equipment: serde_json::Value,
    pub limitations: String,
    pub preferences: serde_json::Value,
    pub last_anamnesis: DateTime<Utc>,
}

/// Input for the anamnesis upsert
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub account_id: Uuid,
    pub primary_goal: String,
    pub experience_level: String,
    pub training_frequency: i32,
    pub available_equipment: serde_json::Value,
    pub limitations: String,
    pub preferences: serde_json::Value,
}

const PROFILE_COLUMNS: &str = "id, account_id, primary_goal, experience_level, \
                               training_frequency, available_equipment, limitations, \
                               preferences, last_anamnesis";

/// Training profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// Create or overwrite the single profile row for an account.
    ///
    /// `ON CONFLICT (account_id)` guarantees at most one row per account
    /// regardless of how many times anamnesis is submitted; every write
    /// overwrites all fields and stamps `last_anamnesis`.
    pub async fn upsert(
        pool: &PgPool,
        input: UpsertProfile,
        now: DateTime<Utc>,
    ) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO training_profiles
                (account_id, primary_goal, experience_level, training_frequency,
                 available_equipment, limitations, preferences, last_anamnesis)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (account_id) DO UPDATE SET
                primary_goal = EXCLUDED.primary_goal,
                experience_level = EXCLUDED.experience_level,
                training_frequency = EXCLUDED.training_frequency,
                available_equipment = EXCLUDED.available_equipment,
                limitations = EXCLUDED.limitations,
                preferences = EXCLUDED.preferences,
                last_anamnesis = EXCLUDED.last_anamnesis
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(input.account_id)
        .bind(&input.primary_goal)
        .bind(&input.experience_level)
        .bind(input.training_frequency)
        .bind(&input.available_equipment)
        .bind(&input.limitations)
        .bind(&input.preferences)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get the profile for an account
    pub async fn get_by_account(pool: &PgPool, account_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"SELECT {PROFILE_COLUMNS} FROM training_profiles WHERE account_id = $1"#,
        ))
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete the profile for an account; the FK cascade takes the
    /// recommendation history with it. Returns false when there was no row.
    pub async fn delete_by_account(pool: &PgPool, account_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM training_profiles WHERE account_id = $1")
            .bind(account_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Recommendation record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub workout_payload: serde_json::Value,
    pub confidence_score: f64,
    pub generated_at: DateTime<Utc>,
    pub feedback_rating: Option<i32>,
    pub feedback_notes: String,
}

const RECOMMENDATION_COLUMNS: &str = "id, profile_id, workout_payload, confidence_score, \
                                      generated_at, feedback_rating, feedback_notes";

/// Recommendation history repository
pub struct RecommendationRepository;

impl RecommendationRepository {
    /// Append one recommendation to the history
    pub async fn create(
        pool: &PgPool,
        profile_id: Uuid,
        workout_payload: &serde_json::Value,
        confidence_score: f64,
        generated_at: DateTime<Utc>,
    ) -> Result<RecommendationRecord> {
        let record = sqlx::query_as::<_, RecommendationRecord>(&format!(
            r#"
            INSERT INTO workout_recommendations
                (profile_id, workout_payload, confidence_score, generated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {RECOMMENDATION_COLUMNS}
            "#,
        ))
        .bind(profile_id)
        .bind(workout_payload)
        .bind(confidence_score)
        .bind(generated_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// History for a profile, most recent first
    pub async fn list_for_profile(
        pool: &PgPool,
        profile_id: Uuid,
    ) -> Result<Vec<RecommendationRecord>> {
        let records = sqlx::query_as::<_, RecommendationRecord>(&format!(
            r#"
            SELECT {RECOMMENDATION_COLUMNS}
            FROM workout_recommendations
            WHERE profile_id = $1
            ORDER BY generated_at DESC
            "#,
        ))
        .bind(profile_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Attach feedback to an owned recommendation; the only mutation the
    /// history permits
    pub async fn attach_feedback(
        pool: &PgPool,
        id: Uuid,
        profile_id: Uuid,
        rating: i32,
        notes: &str,
    ) -> Result<Option<RecommendationRecord>> {
        let record = sqlx::query_as::<_, RecommendationRecord>(&format!(
            r#"
            UPDATE workout_recommendations
            SET feedback_rating = $3, feedback_notes = $4
            WHERE id = $1 AND profile_id = $2
            RETURNING {RECOMMENDATION_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(profile_id)
        .bind(rating)
        .bind(notes)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
