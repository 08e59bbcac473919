//! Catalog service: read-mostly exercise listing plus curator mutations

use crate::auth::{require_role, AuthUser};
use crate::error::ApiError;
use crate::repositories::{
    CatalogFilter, CreateExercise, ExerciseRecord, ExerciseRepository, MuscleGroupRepository,
    UpdateExercise,
};
use crate::services::parse_column;
use fitai_shared::models::Role;
use fitai_shared::types::{
    CreateExerciseRequest, CreateMuscleGroupRequest, ExerciseQuery, ExerciseResponse,
    MuscleGroupResponse, UpdateExerciseRequest,
};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Exercise catalog service
pub struct CatalogService;

impl CatalogService {
    /// List exercises applying the optional query filters
    pub async fn list_exercises(
        pool: &PgPool,
        query: &ExerciseQuery,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let filter = CatalogFilter {
            muscle_group: query.muscle_group.clone(),
            equipment: query.equipment.map(|e| e.as_str().to_string()),
            difficulty: query.difficulty.map(|d| d.as_str().to_string()),
            neural_training: query.neural_training,
            search: query.search.clone(),
        };

        let records = ExerciseRepository::list(pool, &filter)
            .await
            .map_err(ApiError::Internal)?;
        Self::assemble(pool, records).await
    }

    /// Dedicated read path for neural-training exercises
    pub async fn list_neural_training(pool: &PgPool) -> Result<Vec<ExerciseResponse>, ApiError> {
        let records = ExerciseRepository::list_neural_training(pool)
            .await
            .map_err(ApiError::Internal)?;
        Self::assemble(pool, records).await
    }

    /// Get one exercise with its muscle groups
    pub async fn get_exercise(pool: &PgPool, id: Uuid) -> Result<ExerciseResponse, ApiError> {
        let record = ExerciseRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        let mut responses = Self::assemble(pool, vec![record]).await?;
        Ok(responses.remove(0))
    }

    /// List all muscle groups
    pub async fn list_muscle_groups(pool: &PgPool) -> Result<Vec<MuscleGroupResponse>, ApiError> {
        let records = MuscleGroupRepository::get_all(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records
            .into_iter()
            .map(|mg| MuscleGroupResponse {
                id: mg.id.to_string(),
                name: mg.name,
                description: mg.description,
            })
            .collect())
    }

    /// Curator: create a muscle group (admin only)
    pub async fn create_muscle_group(
        pool: &PgPool,
        auth: &AuthUser,
        req: CreateMuscleGroupRequest,
    ) -> Result<MuscleGroupResponse, ApiError> {
        require_role(auth, Role::Admin)?;

        if req.name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        if MuscleGroupRepository::name_exists(pool, &req.name)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Muscle group already exists".to_string()));
        }

        let record = MuscleGroupRepository::create(pool, &req.name, &req.description)
            .await
            .map_err(ApiError::Internal)?;

        Ok(MuscleGroupResponse {
            id: record.id.to_string(),
            name: record.name,
            description: record.description,
        })
    }

    /// Curator: create an exercise (admin only)
    pub async fn create_exercise(
        pool: &PgPool,
        auth: &AuthUser,
        req: CreateExerciseRequest,
    ) -> Result<ExerciseResponse, ApiError> {
        require_role(auth, Role::Admin)?;

        if req.name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        let muscle_group_ids = dedupe_ids(req.muscle_group_ids);
        Self::check_muscle_groups(pool, &muscle_group_ids).await?;

        let record = ExerciseRepository::create(
            pool,
            CreateExercise {
                name: req.name,
                description: req.description,
                instructions: req.instructions,
                equipment: req.equipment.as_str().to_string(),
                difficulty: req.difficulty.as_str().to_string(),
                is_neural_training: req.is_neural_training,
                muscle_group_ids,
                video_url: req.video_url,
                image_url: req.image_url,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        let mut responses = Self::assemble(pool, vec![record]).await?;
        Ok(responses.remove(0))
    }

    /// Curator: update an exercise (admin only)
    pub async fn update_exercise(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
        req: UpdateExerciseRequest,
    ) -> Result<ExerciseResponse, ApiError> {
        require_role(auth, Role::Admin)?;

        let muscle_group_ids = req.muscle_group_ids.map(dedupe_ids);
        if let Some(ref mg_ids) = muscle_group_ids {
            Self::check_muscle_groups(pool, mg_ids).await?;
        }

        let record = ExerciseRepository::update(
            pool,
            id,
            UpdateExercise {
                name: req.name,
                description: req.description,
                instructions: req.instructions,
                equipment: req.equipment.map(|e| e.as_str().to_string()),
                difficulty: req.difficulty.map(|d| d.as_str().to_string()),
                is_neural_training: req.is_neural_training,
                muscle_group_ids,
                video_url: req.video_url,
                image_url: req.image_url,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        let mut responses = Self::assemble(pool, vec![record]).await?;
        Ok(responses.remove(0))
    }

    /// Existence check compares a count against `ids.len()`, and the link
    /// table has a composite primary key, so ids must be unique by the time
    /// they reach either.
    async fn check_muscle_groups(pool: &PgPool, ids: &[Uuid]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        let existing = MuscleGroupRepository::count_existing(pool, ids)
            .await
            .map_err(ApiError::Internal)?;
        if existing != ids.len() as i64 {
            return Err(ApiError::Validation(
                "One or more muscle groups do not exist".to_string(),
            ));
        }
        Ok(())
    }

    /// Join exercises with their muscle groups in one extra query
    async fn assemble(
        pool: &PgPool,
        records: Vec<ExerciseRecord>,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        let links = ExerciseRepository::muscle_groups_for(pool, &ids)
            .await
            .map_err(ApiError::Internal)?;

        let mut by_exercise: HashMap<Uuid, Vec<MuscleGroupResponse>> = HashMap::new();
        for link in links {
            by_exercise
                .entry(link.exercise_id)
                .or_default()
                .push(MuscleGroupResponse {
                    id: link.id.to_string(),
                    name: link.name,
                    description: link.description,
                });
        }

        records
            .into_iter()
            .map(|r| {
                Ok(ExerciseResponse {
                    muscle_groups: by_exercise.remove(&r.id).unwrap_or_default(),
                    id: r.id.to_string(),
                    name: r.name,
                    description: r.description,
                    instructions: r.instructions,
                    equipment: parse_column(&r.equipment, "equipment")?,
                    difficulty: parse_column(&r.difficulty, "difficulty")?,
                    is_neural_training: r.is_neural_training,
                    video_url: r.video_url,
                    image_url: r.image_url,
                })
            })
            .collect()
    }
}

/// Drop repeated ids, keeping first-occurrence order
fn dedupe_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
