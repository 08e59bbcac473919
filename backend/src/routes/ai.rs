//! AI engine routes: anamnesis, plan generation, recommendation history

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AiService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fitai_shared::types::{
    AnamneseRequest, AnamneseResponse, GenerateWorkoutResponse, MessageResponse,
    RecommendationFeedbackRequest, RecommendationResponse, TrainingProfileResponse,
};
use uuid::Uuid;

/// Create AI engine routes
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/engine/anamnese", post(submit_anamnesis))
        .route("/engine/generate-workout", post(generate_workout))
        .route("/engine/my-recommendations", get(my_recommendations))
        .route("/engine/recommendations/:id/feedback", post(submit_feedback))
}

/// Get the caller's training profile
///
/// GET /api/v1/ai/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TrainingProfileResponse>> {
    let profile = AiService::get_profile(state.db(), &auth).await?;
    Ok(Json(profile))
}

/// Replace the caller's training profile (same payload as the questionnaire)
///
/// PUT /api/v1/ai/profile
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AnamneseRequest>,
) -> ApiResult<Json<TrainingProfileResponse>> {
    let profile = AiService::update_profile(state.db(), &auth, req, Utc::now()).await?;
    Ok(Json(profile))
}

/// Delete the caller's training profile and its recommendation history
///
/// DELETE /api/v1/ai/profile
async fn delete_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    AiService::delete_profile(state.db(), &auth).await?;
    Ok(Json(MessageResponse {
        message: "Profile deleted".to_string(),
    }))
}

/// Submit the anamnesis questionnaire
///
/// POST /api/v1/ai/engine/anamnese
async fn submit_anamnesis(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AnamneseRequest>,
) -> ApiResult<Json<AnamneseResponse>> {
    let result = AiService::submit_anamnesis(state.db(), &auth, req, Utc::now()).await?;
    Ok(Json(result))
}

/// Generate a workout recommendation from the caller's profile
///
/// POST /api/v1/ai/engine/generate-workout
async fn generate_workout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<GenerateWorkoutResponse>> {
    let result = AiService::generate(state.db(), &auth, Utc::now()).await?;
    Ok(Json(result))
}

/// The caller's recommendation history, most recent first
///
/// GET /api/v1/ai/engine/my-recommendations
async fn my_recommendations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RecommendationResponse>>> {
    let history = AiService::history(state.db(), &auth).await?;
    Ok(Json(history))
}

/// Attach feedback to a past recommendation
///
/// POST /api/v1/ai/engine/recommendations/:id/feedback
async fn submit_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RecommendationFeedbackRequest>,
) -> ApiResult<Json<RecommendationResponse>> {
    let result = AiService::attach_feedback(state.db(), &auth, id, req).await?;
    Ok(Json(result))
}
