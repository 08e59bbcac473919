//! Workout services: template building and the user-workout lifecycle
//!
//! Transition operations take the current time as a parameter so the state
//! machine stays deterministic under test; handlers pass `Utc::now()`.

use crate::auth::{require_role, AuthUser};
use crate::error::ApiError;
use crate::repositories::{
    CreateTemplate, ExerciseRepository, NewWorkoutExercise, TemplateFilter, TemplateRecord,
    TemplateRepository, UpdateTemplate, UserWorkoutRecord, UserWorkoutRepository,
};
use crate::services::parse_column;
use chrono::{DateTime, NaiveDate, Utc};
use fitai_shared::models::{Role, WorkoutStatus};
use fitai_shared::types::{
    CreateTemplateRequest, CreateUserWorkoutRequest, TemplateQuery, TemplateResponse,
    UpdateTemplateRequest, UserWorkoutQuery, UserWorkoutResponse, WorkoutExerciseResponse,
    WorkoutExerciseSpec,
};
use fitai_shared::validation::{
    validate_estimated_duration, validate_load_percentage, validate_reps, validate_rest_seconds,
    validate_sets,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Workout template service
pub struct TemplateService;

impl TemplateService {
    /// Create a template with its prescriptions (trainer only).
    ///
    /// The template row and all prescription rows are committed as one
    /// transaction; a rejected spec rolls back the whole operation.
    pub async fn create(
        pool: &PgPool,
        auth: &AuthUser,
        req: CreateTemplateRequest,
    ) -> Result<TemplateResponse, ApiError> {
        require_role(auth, Role::Trainer)?;

        if req.name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        validate_estimated_duration(req.estimated_duration_minutes)
            .map_err(ApiError::Validation)?;
        let exercises = Self::validate_specs(pool, &req.exercises).await?;

        let template = TemplateRepository::create(
            pool,
            CreateTemplate {
                name: req.name,
                description: req.description,
                goal: req.goal.as_str().to_string(),
                difficulty: req.difficulty.as_str().to_string(),
                estimated_duration_minutes: req.estimated_duration_minutes,
                trainer_id: auth.account_id,
                is_generated: false,
                exercises,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Self::to_response(pool, template).await
    }

    /// List templates; the read path is visible to every role
    pub async fn list(
        pool: &PgPool,
        query: &TemplateQuery,
    ) -> Result<Vec<TemplateResponse>, ApiError> {
        let filter = TemplateFilter {
            goal: query.goal.map(|g| g.as_str().to_string()),
            difficulty: query.difficulty.map(|d| d.as_str().to_string()),
            trainer_id: query.trainer,
            is_generated: query.is_generated,
        };

        let templates = TemplateRepository::list(pool, &filter)
            .await
            .map_err(ApiError::Internal)?;
        Self::to_responses(pool, templates).await
    }

    /// Templates owned by the calling trainer (403 for other roles)
    pub async fn list_mine(
        pool: &PgPool,
        auth: &AuthUser,
    ) -> Result<Vec<TemplateResponse>, ApiError> {
        require_role(auth, Role::Trainer)?;

        let templates = TemplateRepository::list_by_trainer(pool, auth.account_id)
            .await
            .map_err(ApiError::Internal)?;
        Self::to_responses(pool, templates).await
    }

    /// Get one template with its ordered prescriptions
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<TemplateResponse, ApiError> {
        let template = TemplateRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        Self::to_response(pool, template).await
    }

    /// Update an owned template; a provided exercise list atomically
    /// replaces the previous prescriptions
    pub async fn update(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
        req: UpdateTemplateRequest,
    ) -> Result<TemplateResponse, ApiError> {
        Self::check_ownership(pool, auth, id).await?;

        if let Some(minutes) = req.estimated_duration_minutes {
            validate_estimated_duration(minutes).map_err(ApiError::Validation)?;
        }
        let exercises = match req.exercises {
            Some(ref specs) => Some(Self::validate_specs(pool, specs).await?),
            None => None,
        };

        let template = TemplateRepository::update(
            pool,
            id,
            UpdateTemplate {
                name: req.name,
                description: req.description,
                goal: req.goal.map(|g| g.as_str().to_string()),
                difficulty: req.difficulty.map(|d| d.as_str().to_string()),
                estimated_duration_minutes: req.estimated_duration_minutes,
                exercises,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        Self::to_response(pool, template).await
    }

    /// Delete an owned template
    pub async fn delete(pool: &PgPool, auth: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        Self::check_ownership(pool, auth, id).await?;

        let deleted = TemplateRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Template not found".to_string()));
        }
        Ok(())
    }

    /// Update/delete are restricted to the owning trainer
    async fn check_ownership(pool: &PgPool, auth: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        require_role(auth, Role::Trainer)?;

        let template = TemplateRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        if template.trainer_id != auth.account_id {
            return Err(ApiError::Forbidden(
                "Only the owning trainer may modify this template".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate prescription specs and check the referenced exercises exist.
    /// Positions are stored exactly as supplied; duplicates and gaps are the
    /// caller's business.
    async fn validate_specs(
        pool: &PgPool,
        specs: &[WorkoutExerciseSpec],
    ) -> Result<Vec<NewWorkoutExercise>, ApiError> {
        let mut out = Vec::with_capacity(specs.len());
        for spec in specs {
            validate_sets(spec.sets).map_err(ApiError::Validation)?;
            validate_reps(&spec.reps).map_err(ApiError::Validation)?;
            validate_rest_seconds(spec.rest_seconds).map_err(ApiError::Validation)?;
            if let Some(load) = spec.load_percentage {
                validate_load_percentage(load).map_err(ApiError::Validation)?;
            }
            if !ExerciseRepository::exists(pool, spec.exercise_id)
                .await
                .map_err(ApiError::Internal)?
            {
                return Err(ApiError::Validation(format!(
                    "Exercise {} does not exist",
                    spec.exercise_id
                )));
            }
            out.push(NewWorkoutExercise {
                exercise_id: spec.exercise_id,
                sets: spec.sets,
                reps: spec.reps.clone(),
                rest_seconds: spec.rest_seconds,
                load_percentage: spec.load_percentage,
                position: spec.position,
                notes: spec.notes.clone(),
            });
        }
        Ok(out)
    }

    async fn to_responses(
        pool: &PgPool,
        templates: Vec<TemplateRecord>,
    ) -> Result<Vec<TemplateResponse>, ApiError> {
        let mut out = Vec::with_capacity(templates.len());
        for template in templates {
            out.push(Self::to_response(pool, template).await?);
        }
        Ok(out)
    }

    async fn to_response(
        pool: &PgPool,
        template: TemplateRecord,
    ) -> Result<TemplateResponse, ApiError> {
        let exercises = TemplateRepository::exercises_for(pool, template.id)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|ex| WorkoutExerciseResponse {
                id: ex.id.to_string(),
                exercise_id: ex.exercise_id.to_string(),
                exercise_name: ex.exercise_name,
                sets: ex.sets,
                reps: ex.reps,
                rest_seconds: ex.rest_seconds,
                load_percentage: ex.load_percentage,
                position: ex.position,
                notes: ex.notes,
            })
            .collect();

        Ok(TemplateResponse {
            id: template.id.to_string(),
            name: template.name,
            description: template.description,
            goal: parse_column(&template.goal, "goal")?,
            difficulty: parse_column(&template.difficulty, "difficulty")?,
            estimated_duration_minutes: template.estimated_duration_minutes,
            trainer_id: template.trainer_id.to_string(),
            is_generated: template.is_generated,
            created_at: template.created_at,
            exercises,
        })
    }
}

/// User workout lifecycle service
pub struct UserWorkoutService;

impl UserWorkoutService {
    /// Book a template instance for the caller
    pub async fn create(
        pool: &PgPool,
        auth: &AuthUser,
        req: CreateUserWorkoutRequest,
    ) -> Result<UserWorkoutResponse, ApiError> {
        TemplateRepository::get_by_id(pool, req.template_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        let record =
            UserWorkoutRepository::create(pool, auth.account_id, req.template_id, req.scheduled_at)
                .await
                .map_err(ApiError::Internal)?;

        Self::to_response(record)
    }

    /// List the caller's workouts, optionally filtered by status
    pub async fn list(
        pool: &PgPool,
        auth: &AuthUser,
        query: &UserWorkoutQuery,
    ) -> Result<Vec<UserWorkoutResponse>, ApiError> {
        let status = query.status.map(|s| s.as_str());
        let records = UserWorkoutRepository::list_for_account(pool, auth.account_id, status)
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// The caller's workouts scheduled on `today` (UTC calendar date)
    pub async fn list_today(
        pool: &PgPool,
        auth: &AuthUser,
        today: NaiveDate,
    ) -> Result<Vec<UserWorkoutResponse>, ApiError> {
        let records = UserWorkoutRepository::list_for_date(pool, auth.account_id, today)
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// Get one of the caller's workouts
    pub async fn get(pool: &PgPool, auth: &AuthUser, id: Uuid) -> Result<UserWorkoutResponse, ApiError> {
        let record = UserWorkoutRepository::get_by_id(pool, id, auth.account_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Workout not found".to_string()))?;

        Self::to_response(record)
    }

    /// Transition scheduled -> in_progress
    pub async fn start(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<UserWorkoutResponse, ApiError> {
        let updated = UserWorkoutRepository::start(pool, id, auth.account_id, now)
            .await
            .map_err(ApiError::Internal)?;

        match updated {
            Some(record) => Self::to_response(record),
            None => Err(Self::transition_failure(pool, auth, id, WorkoutStatus::Scheduled).await?),
        }
    }

    /// Transition in_progress -> completed, attaching optional notes
    pub async fn complete(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<UserWorkoutResponse, ApiError> {
        let notes = notes.unwrap_or_default();
        let updated = UserWorkoutRepository::complete(pool, id, auth.account_id, now, &notes)
            .await
            .map_err(ApiError::Internal)?;

        match updated {
            Some(record) => Self::to_response(record),
            None => Err(Self::transition_failure(pool, auth, id, WorkoutStatus::InProgress).await?),
        }
    }

    /// Transition scheduled -> skipped
    pub async fn skip(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
    ) -> Result<UserWorkoutResponse, ApiError> {
        let updated = UserWorkoutRepository::skip(pool, id, auth.account_id)
            .await
            .map_err(ApiError::Internal)?;

        match updated {
            Some(record) => Self::to_response(record),
            None => Err(Self::transition_failure(pool, auth, id, WorkoutStatus::Scheduled).await?),
        }
    }

    /// Delete one of the caller's workouts
    pub async fn delete(pool: &PgPool, auth: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        let deleted = UserWorkoutRepository::delete(pool, id, auth.account_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Workout not found".to_string()));
        }
        Ok(())
    }

    /// The conditional UPDATE matched nothing: tell the caller whether the
    /// workout is missing or merely in the wrong status
    async fn transition_failure(
        pool: &PgPool,
        auth: &AuthUser,
        id: Uuid,
        expected: WorkoutStatus,
    ) -> Result<ApiError, ApiError> {
        let record = UserWorkoutRepository::get_by_id(pool, id, auth.account_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(match record {
            None => ApiError::NotFound("Workout not found".to_string()),
            Some(record) => ApiError::StateConflict(format!(
                "Workout is {}, expected {}",
                record.status,
                expected.as_str()
            )),
        })
    }

    fn to_response(record: UserWorkoutRecord) -> Result<UserWorkoutResponse, ApiError> {
        Ok(UserWorkoutResponse {
            id: record.id.to_string(),
            account_id: record.account_id.to_string(),
            template_id: record.template_id.to_string(),
            template_name: record.template_name,
            scheduled_at: record.scheduled_at,
            started_at: record.started_at,
            completed_at: record.completed_at,
            status: parse_column(&record.status, "status")?,
            notes: record.notes,
        })
    }
}
