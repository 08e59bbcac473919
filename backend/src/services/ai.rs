//! AI engine service: anamnesis intake, canned plan generation, and the
//! recommendation history.
//!
//! Generation is deterministic per goal. The plan table is a closed match
//! over `TrainingGoal`; goals without a dedicated plan fall through to the
//! strength plan. Only the confidence score is randomized.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{
    ProfileRecord, ProfileRepository, RecommendationRecord, RecommendationRepository,
    UpsertProfile,
};
use crate::services::parse_column;
use chrono::{DateTime, Utc};
use fitai_shared::models::TrainingGoal;
use fitai_shared::types::{
    AnamneseRequest, AnamneseResponse, GenerateWorkoutResponse, RecommendationFeedbackRequest,
    RecommendationResponse, TrainingProfileResponse,
};
use fitai_shared::validation::{validate_feedback_rating, validate_training_frequency};
use once_cell::sync::Lazy;
use rand::Rng;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

static NEURAL_PLAN: Lazy<serde_json::Value> = Lazy::new(|| {
    json!({
        "name": "Treino Neural IA",
        "focus": "neural_strength",
        "exercises": [
            {"name": "Agachamento Explosivo", "sets": 4, "reps": "6", "notes": "85% 1RM"},
            {"name": "Supino Velocidade", "sets": 5, "reps": "3", "notes": "Máxima velocidade"},
            {"name": "Levantamento Olímpico", "sets": 4, "reps": "4", "notes": "Técnica perfeita"}
        ]
    })
});

static STRENGTH_PLAN: Lazy<serde_json::Value> = Lazy::new(|| {
    json!({
        "name": "Treino de Força IA",
        "focus": "strength",
        "exercises": [
            {"name": "Agachamento", "sets": 4, "reps": "5", "notes": "80% 1RM"},
            {"name": "Supino", "sets": 4, "reps": "5", "notes": "80% 1RM"},
            {"name": "Levantamento Terra", "sets": 3, "reps": "5", "notes": "85% 1RM"}
        ]
    })
});

/// Pick the canned plan for a goal; goals without a dedicated plan get
/// the strength plan
fn canned_plan(goal: TrainingGoal) -> &'static serde_json::Value {
    match goal {
        TrainingGoal::NeuralStrength => &NEURAL_PLAN,
        TrainingGoal::Strength => &STRENGTH_PLAN,
        _ => &STRENGTH_PLAN,
    }
}

/// AI engine service
pub struct AiService;

impl AiService {
    /// Submit the anamnesis questionnaire, creating or overwriting the
    /// caller's training profile
    pub async fn submit_anamnesis(
        pool: &PgPool,
        auth: &AuthUser,
        req: AnamneseRequest,
        now: DateTime<Utc>,
    ) -> Result<AnamneseResponse, ApiError> {
        validate_training_frequency(req.training_frequency).map_err(ApiError::Validation)?;

        let available_equipment = serde_json::to_value(&req.available_equipment)
            .map_err(|e| ApiError::Internal(e.into()))?;
        let preferences = req.preferences.unwrap_or_else(|| json!({}));

        let record = ProfileRepository::upsert(
            pool,
            UpsertProfile {
                account_id: auth.account_id,
                primary_goal: req.primary_goal.as_str().to_string(),
                experience_level: req.experience_level.as_str().to_string(),
                training_frequency: req.training_frequency,
                available_equipment,
                limitations: req.limitations,
                preferences,
            },
            now,
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(AnamneseResponse {
            profile: Self::profile_response(record)?,
            message: "Anamnese registrada com sucesso".to_string(),
        })
    }

    /// Get the caller's training profile
    pub async fn get_profile(
        pool: &PgPool,
        auth: &AuthUser,
    ) -> Result<TrainingProfileResponse, ApiError> {
        let record = Self::require_profile(pool, auth).await?;
        Self::profile_response(record)
    }

    /// Replace the caller's training profile. A profile edit carries the
    /// same payload and validation as the questionnaire and lands on the
    /// same upsert, so it re-stamps `last_anamnesis`.
    pub async fn update_profile(
        pool: &PgPool,
        auth: &AuthUser,
        req: AnamneseRequest,
        now: DateTime<Utc>,
    ) -> Result<TrainingProfileResponse, ApiError> {
        let result = Self::submit_anamnesis(pool, auth, req, now).await?;
        Ok(result.profile)
    }

    /// Delete the caller's training profile; cascades to the
    /// recommendation history
    pub async fn delete_profile(pool: &PgPool, auth: &AuthUser) -> Result<(), ApiError> {
        let deleted = ProfileRepository::delete_by_account(pool, auth.account_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Profile not found".to_string()));
        }
        Ok(())
    }

    /// Generate a workout recommendation from the caller's profile and
    /// append it to the history
    pub async fn generate(
        pool: &PgPool,
        auth: &AuthUser,
        now: DateTime<Utc>,
    ) -> Result<GenerateWorkoutResponse, ApiError> {
        let profile = Self::require_profile(pool, auth).await?;

        let goal: TrainingGoal = parse_column(&profile.primary_goal, "primary_goal")?;
        let workout = canned_plan(goal).clone();
        let confidence_score = rand::thread_rng().gen_range(0.85..=0.98);

        let record = RecommendationRepository::create(
            pool,
            profile.id,
            &workout,
            confidence_score,
            now,
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(GenerateWorkoutResponse {
            workout,
            confidence_score,
            recommendation_id: record.id.to_string(),
            message: "Treino gerado com sucesso".to_string(),
        })
    }

    /// The caller's recommendation history, most recent first
    pub async fn history(
        pool: &PgPool,
        auth: &AuthUser,
    ) -> Result<Vec<RecommendationResponse>, ApiError> {
        let profile = Self::require_profile(pool, auth).await?;

        let records = RecommendationRepository::list_for_profile(pool, profile.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Self::recommendation_response).collect())
    }

    /// Attach a 1-5 rating (and optional notes) to one of the caller's
    /// past recommendations
    pub async fn attach_feedback(
        pool: &PgPool,
        auth: &AuthUser,
        recommendation_id: Uuid,
        req: RecommendationFeedbackRequest,
    ) -> Result<RecommendationResponse, ApiError> {
        validate_feedback_rating(req.rating).map_err(ApiError::Validation)?;

        let profile = Self::require_profile(pool, auth).await?;

        let record = RecommendationRepository::attach_feedback(
            pool,
            recommendation_id,
            profile.id,
            req.rating,
            &req.notes,
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Recommendation not found".to_string()))?;

        Ok(Self::recommendation_response(record))
    }

    async fn require_profile(pool: &PgPool, auth: &AuthUser) -> Result<ProfileRecord, ApiError> {
        ProfileRepository::get_by_account(pool, auth.account_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::NotFound(
                    "Profile not found; submit the anamnesis questionnaire first".to_string(),
                )
            })
    }

    fn profile_response(record: ProfileRecord) -> Result<TrainingProfileResponse, ApiError> {
        let available_equipment = serde_json::from_value(record.available_equipment)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Corrupt equipment column: {e}")))?;

        Ok(TrainingProfileResponse {
            id: record.id.to_string(),
            account_id: record.account_id.to_string(),
            primary_goal: parse_column(&record.primary_goal, "primary_goal")?,
            experience_level: parse_column(&record.experience_level, "experience_level")?,
            training_frequency: record.training_frequency,
            available_equipment,
            limitations: record.limitations,
            preferences: record.preferences,
            last_anamnesis: record.last_anamnesis,
        })
    }

    fn recommendation_response(record: RecommendationRecord) -> RecommendationResponse {
        RecommendationResponse {
            id: record.id.to_string(),
            workout: record.workout_payload,
            confidence_score: record.confidence_score,
            generated_at: record.generated_at,
            feedback_rating: record.feedback_rating,
            feedback_notes: record.feedback_notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neural_goal_gets_neural_plan() {
        let plan = canned_plan(TrainingGoal::NeuralStrength);
        assert_eq!(plan["name"], "Treino Neural IA");
        assert_eq!(plan["exercises"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_strength_goal_gets_strength_plan() {
        let plan = canned_plan(TrainingGoal::Strength);
        assert_eq!(plan["name"], "Treino de Força IA");
    }

    #[test]
    fn test_other_goals_fall_back_to_strength_plan() {
        for goal in [
            TrainingGoal::Hypertrophy,
            TrainingGoal::Endurance,
            TrainingGoal::WeightLoss,
        ] {
            assert_eq!(canned_plan(goal)["name"], "Treino de Força IA");
        }
    }

    #[test]
    fn test_confidence_score_range() {
        for _ in 0..100 {
            let score: f64 = rand::thread_rng().gen_range(0.85..=0.98);
            assert!((0.85..=0.98).contains(&score));
        }
    }
}
