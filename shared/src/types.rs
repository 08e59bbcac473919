//! API request and response types

use crate::models::{
    Difficulty, Equipment, ExperienceLevel, Role, TemplateDifficulty, TrainingGoal, WorkoutStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Generic message payload for operations without a resource body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Identity
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request
///
/// Role is never accepted here: every new account starts as a client and
/// role changes are an administrative operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Account response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub profile_picture_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Self-service account update (contact and physical attributes only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// Administrative role change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

// ============================================================================
// Catalog
// ============================================================================

/// Muscle group response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroupResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Curator request to create a muscle group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMuscleGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Exercise response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub is_neural_training: bool,
    pub muscle_groups: Vec<MuscleGroupResponse>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

/// Catalog listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseQuery {
    /// Filter by muscle group name
    pub muscle_group: Option<String>,
    pub equipment: Option<Equipment>,
    pub difficulty: Option<Difficulty>,
    pub neural_training: Option<bool>,
    /// Free-text search over name and description
    pub search: Option<String>,
}

/// Curator request to create an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_neural_training: bool,
    pub muscle_group_ids: Vec<Uuid>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Curator request to update an exercise (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExerciseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub is_neural_training: Option<bool>,
    #[serde(default)]
    pub muscle_group_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// ============================================================================
// Workout templates
// ============================================================================

/// One prescribed exercise inside a template create/update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExerciseSpec {
    pub exercise_id: Uuid,
    pub sets: i32,
    /// Free-form: "8-12", "30 seconds", ...
    pub reps: String,
    pub rest_seconds: i32,
    #[serde(default)]
    pub load_percentage: Option<f64>,
    /// Caller-supplied order index, stored as given
    pub position: i32,
    #[serde(default)]
    pub notes: String,
}

/// Trainer request to create a workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: String,
    pub goal: TrainingGoal,
    pub difficulty: TemplateDifficulty,
    pub estimated_duration_minutes: i32,
    pub exercises: Vec<WorkoutExerciseSpec>,
}

/// Trainer request to update an owned template (partial)
///
/// When `exercises` is present the whole prescription list is replaced
/// atomically with the template row update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goal: Option<TrainingGoal>,
    #[serde(default)]
    pub difficulty: Option<TemplateDifficulty>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<i32>,
    #[serde(default)]
    pub exercises: Option<Vec<WorkoutExerciseSpec>>,
}

/// Template listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateQuery {
    pub goal: Option<TrainingGoal>,
    pub difficulty: Option<TemplateDifficulty>,
    pub trainer: Option<Uuid>,
    pub is_generated: Option<bool>,
}

/// A prescribed exercise inside a template response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExerciseResponse {
    pub id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: String,
    pub rest_seconds: i32,
    pub load_percentage: Option<f64>,
    pub position: i32,
    pub notes: String,
}

/// Workout template response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub goal: TrainingGoal,
    pub difficulty: TemplateDifficulty,
    pub estimated_duration_minutes: i32,
    pub trainer_id: String,
    pub is_generated: bool,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<WorkoutExerciseResponse>,
}

// ============================================================================
// User workouts
// ============================================================================

/// Request to book a template instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserWorkoutRequest {
    pub template_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

/// Optional notes attached when completing a workout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteWorkoutRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// User workout listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserWorkoutQuery {
    pub status: Option<WorkoutStatus>,
}

/// Scheduled workout instance response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWorkoutResponse {
    pub id: String,
    pub account_id: String,
    pub template_id: String,
    pub template_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: WorkoutStatus,
    pub notes: String,
}

// ============================================================================
// Training profile & recommendations
// ============================================================================

/// Anamnesis intake request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnamneseRequest {
    pub primary_goal: TrainingGoal,
    pub experience_level: ExperienceLevel,
    pub training_frequency: i32,
    #[serde(default)]
    pub available_equipment: Vec<Equipment>,
    #[serde(default)]
    pub limitations: String,
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
}

/// Training profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProfileResponse {
    pub id: String,
    pub account_id: String,
    pub primary_goal: TrainingGoal,
    pub experience_level: ExperienceLevel,
    pub training_frequency: i32,
    pub available_equipment: Vec<Equipment>,
    pub limitations: String,
    pub preferences: serde_json::Value,
    pub last_anamnesis: DateTime<Utc>,
}

/// Anamnesis result payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnamneseResponse {
    pub profile: TrainingProfileResponse,
    pub message: String,
}

/// Generated workout recommendation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWorkoutResponse {
    pub workout: serde_json::Value,
    pub confidence_score: f64,
    pub recommendation_id: String,
    pub message: String,
}

/// One entry of the recommendation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub id: String,
    pub workout: serde_json::Value,
    pub confidence_score: f64,
    pub generated_at: DateTime<Utc>,
    pub feedback_rating: Option<i32>,
    pub feedback_notes: String,
}

/// Feedback attached to a past recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationFeedbackRequest {
    pub rating: i32,
    #[serde(default)]
    pub notes: String,
}
