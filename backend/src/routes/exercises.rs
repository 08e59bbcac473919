//! Exercise catalog routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use fitai_shared::types::{
    CreateExerciseRequest, CreateMuscleGroupRequest, ExerciseQuery, ExerciseResponse,
    MuscleGroupResponse, UpdateExerciseRequest,
};
use uuid::Uuid;

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/neural-training", get(list_neural_training))
        .route("/:id", get(get_exercise).put(update_exercise))
}

/// Muscle group routes
pub fn muscle_group_routes() -> Router<AppState> {
    Router::new().route("/", get(list_muscle_groups).post(create_muscle_group))
}

/// List exercises with optional filters
///
/// GET /api/v1/exercises
async fn list_exercises(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ExerciseQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let exercises = CatalogService::list_exercises(state.db(), &query).await?;
    Ok(Json(exercises))
}

/// List neural-training exercises
///
/// GET /api/v1/exercises/neural-training
async fn list_neural_training(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let exercises = CatalogService::list_neural_training(state.db()).await?;
    Ok(Json(exercises))
}

/// Get one exercise
///
/// GET /api/v1/exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = CatalogService::get_exercise(state.db(), id).await?;
    Ok(Json(exercise))
}

/// Create an exercise (admin only)
///
/// POST /api/v1/exercises
async fn create_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = CatalogService::create_exercise(state.db(), &auth, req).await?;
    Ok(Json(exercise))
}

/// Update an exercise (admin only)
///
/// PUT /api/v1/exercises/:id
async fn update_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = CatalogService::update_exercise(state.db(), &auth, id, req).await?;
    Ok(Json(exercise))
}

/// List muscle groups
///
/// GET /api/v1/muscle-groups
async fn list_muscle_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<MuscleGroupResponse>>> {
    let groups = CatalogService::list_muscle_groups(state.db()).await?;
    Ok(Json(groups))
}

/// Create a muscle group (admin only)
///
/// POST /api/v1/muscle-groups
async fn create_muscle_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMuscleGroupRequest>,
) -> ApiResult<Json<MuscleGroupResponse>> {
    let group = CatalogService::create_muscle_group(state.db(), &auth, req).await?;
    Ok(Json(group))
}
