//! Workout template and user-workout routes
//!
//! Transition handlers pass `Utc::now()` down so the services stay
//! clock-free and deterministic under test.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{TemplateService, UserWorkoutService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fitai_shared::types::{
    CompleteWorkoutRequest, CreateTemplateRequest, CreateUserWorkoutRequest, MessageResponse,
    TemplateQuery, TemplateResponse, UpdateTemplateRequest, UserWorkoutQuery, UserWorkoutResponse,
};
use uuid::Uuid;

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/mine", get(list_my_templates))
        .route(
            "/templates/:id",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/user-workouts", get(list_user_workouts).post(create_user_workout))
        .route("/user-workouts/today", get(list_today))
        .route(
            "/user-workouts/:id",
            get(get_user_workout).delete(delete_user_workout),
        )
        .route("/user-workouts/:id/start", post(start_workout))
        .route("/user-workouts/:id/complete", post(complete_workout))
        .route("/user-workouts/:id/skip", post(skip_workout))
}

/// List templates with optional filters
///
/// GET /api/v1/workouts/templates
async fn list_templates(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<TemplateQuery>,
) -> ApiResult<Json<Vec<TemplateResponse>>> {
    let templates = TemplateService::list(state.db(), &query).await?;
    Ok(Json(templates))
}

/// Create a template with prescriptions (trainer only)
///
/// POST /api/v1/workouts/templates
async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTemplateRequest>,
) -> ApiResult<Json<TemplateResponse>> {
    let template = TemplateService::create(state.db(), &auth, req).await?;
    Ok(Json(template))
}

/// Templates owned by the calling trainer
///
/// GET /api/v1/workouts/templates/mine
async fn list_my_templates(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TemplateResponse>>> {
    let templates = TemplateService::list_mine(state.db(), &auth).await?;
    Ok(Json(templates))
}

/// Get one template with its ordered prescriptions
///
/// GET /api/v1/workouts/templates/:id
async fn get_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TemplateResponse>> {
    let template = TemplateService::get(state.db(), id).await?;
    Ok(Json(template))
}

/// Update an owned template (owning trainer only)
///
/// PUT /api/v1/workouts/templates/:id
async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTemplateRequest>,
) -> ApiResult<Json<TemplateResponse>> {
    let template = TemplateService::update(state.db(), &auth, id, req).await?;
    Ok(Json(template))
}

/// Delete an owned template (owning trainer only)
///
/// DELETE /api/v1/workouts/templates/:id
async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    TemplateService::delete(state.db(), &auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Template deleted".to_string(),
    }))
}

/// Book a template instance for the caller
///
/// POST /api/v1/workouts/user-workouts
async fn create_user_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserWorkoutRequest>,
) -> ApiResult<Json<UserWorkoutResponse>> {
    let workout = UserWorkoutService::create(state.db(), &auth, req).await?;
    Ok(Json(workout))
}

/// List the caller's workouts, optionally filtered by status
///
/// GET /api/v1/workouts/user-workouts
async fn list_user_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserWorkoutQuery>,
) -> ApiResult<Json<Vec<UserWorkoutResponse>>> {
    let workouts = UserWorkoutService::list(state.db(), &auth, &query).await?;
    Ok(Json(workouts))
}

/// The caller's workouts scheduled today (UTC)
///
/// GET /api/v1/workouts/user-workouts/today
async fn list_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserWorkoutResponse>>> {
    let today = Utc::now().date_naive();
    let workouts = UserWorkoutService::list_today(state.db(), &auth, today).await?;
    Ok(Json(workouts))
}

/// Get one of the caller's workouts
///
/// GET /api/v1/workouts/user-workouts/:id
async fn get_user_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserWorkoutResponse>> {
    let workout = UserWorkoutService::get(state.db(), &auth, id).await?;
    Ok(Json(workout))
}

/// Start a scheduled workout
///
/// POST /api/v1/workouts/user-workouts/:id/start
async fn start_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserWorkoutResponse>> {
    let workout = UserWorkoutService::start(state.db(), &auth, id, Utc::now()).await?;
    Ok(Json(workout))
}

/// Complete an in-progress workout, attaching optional notes
///
/// POST /api/v1/workouts/user-workouts/:id/complete
///
/// The body is optional; a bare POST completes with empty notes.
async fn complete_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    req: Option<Json<CompleteWorkoutRequest>>,
) -> ApiResult<Json<UserWorkoutResponse>> {
    let notes = req.and_then(|Json(req)| req.notes);
    let workout = UserWorkoutService::complete(state.db(), &auth, id, notes, Utc::now()).await?;
    Ok(Json(workout))
}

/// Skip a scheduled workout
///
/// POST /api/v1/workouts/user-workouts/:id/skip
async fn skip_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserWorkoutResponse>> {
    let workout = UserWorkoutService::skip(state.db(), &auth, id).await?;
    Ok(Json(workout))
}

/// Delete one of the caller's workouts
///
/// DELETE /api/v1/workouts/user-workouts/:id
async fn delete_user_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    UserWorkoutService::delete(state.db(), &auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Workout deleted".to_string(),
    }))
}
