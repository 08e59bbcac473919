//! Workout repository: templates, their prescriptions, and user workouts
//!
//! Lifecycle transitions on user workouts are enforced here with atomic
//! conditional UPDATEs (`... AND status = <expected>`), so two racing
//! transition requests can never both succeed.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Workout template record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub difficulty: String,
    pub estimated_duration_minutes: i32,
    pub trainer_id: Uuid,
    pub is_generated: bool,
    pub created_at: DateTime<Utc>,
}

/// Prescribed exercise row, joined with the exercise name for display
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutExerciseRecord {
    pub id: Uuid,
    pub template_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: String,
    pub rest_seconds: i32,
    pub load_percentage: Option<f64>,
    pub position: i32,
    pub notes: String,
}

/// One prescription to insert with a template
#[derive(Debug, Clone)]
pub struct NewWorkoutExercise {
    pub exercise_id: Uuid,
    pub sets: i32,
    pub reps: String,
    pub rest_seconds: i32,
    pub load_percentage: Option<f64>,
    pub position: i32,
    pub notes: String,
}

/// Input for creating a template with its prescriptions
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub name: String,
    pub description: String,
    pub goal: String,
    pub difficulty: String,
    pub estimated_duration_minutes: i32,
    pub trainer_id: Uuid,
    pub is_generated: bool,
    pub exercises: Vec<NewWorkoutExercise>,
}

/// Input for partially updating a template
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    /// When present the whole prescription list is replaced
    pub exercises: Option<Vec<NewWorkoutExercise>>,
}

/// Template listing filter; fields combine with AND
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    pub goal: Option<String>,
    pub difficulty: Option<String>,
    pub trainer_id: Option<Uuid>,
    pub is_generated: Option<bool>,
}

const TEMPLATE_COLUMNS: &str = "id, name, description, goal, difficulty, \
                                estimated_duration_minutes, trainer_id, is_generated, created_at";

/// Workout template repository
pub struct TemplateRepository;

impl TemplateRepository {
    /// Create a template and its prescription rows in ONE transaction.
    ///
    /// A partially created template (row persisted, prescriptions missing)
    /// is never observable: the whole unit commits or rolls back together.
    pub async fn create(pool: &PgPool, input: CreateTemplate) -> Result<TemplateRecord> {
        let mut tx = pool.begin().await?;

        let template = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"
            INSERT INTO workout_templates
                (name, description, goal, difficulty, estimated_duration_minutes,
                 trainer_id, is_generated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TEMPLATE_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.goal)
        .bind(&input.difficulty)
        .bind(input.estimated_duration_minutes)
        .bind(input.trainer_id)
        .bind(input.is_generated)
        .fetch_one(&mut *tx)
        .await?;

        for ex in &input.exercises {
            Self::insert_exercise(&mut tx, template.id, ex).await?;
        }

        tx.commit().await?;

        Ok(template)
    }

    async fn insert_exercise(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        template_id: Uuid,
        ex: &NewWorkoutExercise,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workout_exercises
                (template_id, exercise_id, sets, reps, rest_seconds, load_percentage, position, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(template_id)
        .bind(ex.exercise_id)
        .bind(ex.sets)
        .bind(&ex.reps)
        .bind(ex.rest_seconds)
        .bind(ex.load_percentage)
        .bind(ex.position)
        .bind(&ex.notes)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Partially update a template; prescription replacement happens in the
    /// same transaction as the row update
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateTemplate,
    ) -> Result<Option<TemplateRecord>> {
        let mut tx = pool.begin().await?;

        let template = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"
            UPDATE workout_templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                goal = COALESCE($4, goal),
                difficulty = COALESCE($5, difficulty),
                estimated_duration_minutes = COALESCE($6, estimated_duration_minutes)
            WHERE id = $1
            RETURNING {TEMPLATE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(updates.name)
        .bind(updates.description)
        .bind(updates.goal)
        .bind(updates.difficulty)
        .bind(updates.estimated_duration_minutes)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(template) = template else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(exercises) = updates.exercises {
            sqlx::query(r#"DELETE FROM workout_exercises WHERE template_id = $1"#)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for ex in &exercises {
                Self::insert_exercise(&mut tx, id, ex).await?;
            }
        }

        tx.commit().await?;

        Ok(Some(template))
    }

    /// Get template by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TemplateRecord>> {
        let record = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"SELECT {TEMPLATE_COLUMNS} FROM workout_templates WHERE id = $1"#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List templates with optional filters; read path is not owner-scoped
    pub async fn list(pool: &PgPool, filter: &TemplateFilter) -> Result<Vec<TemplateRecord>> {
        let records = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"
            SELECT {TEMPLATE_COLUMNS}
            FROM workout_templates
            WHERE ($1::text IS NULL OR goal = $1)
              AND ($2::text IS NULL OR difficulty = $2)
              AND ($3::uuid IS NULL OR trainer_id = $3)
              AND ($4::boolean IS NULL OR is_generated = $4)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(&filter.goal)
        .bind(&filter.difficulty)
        .bind(filter.trainer_id)
        .bind(filter.is_generated)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Templates owned by one trainer
    pub async fn list_by_trainer(pool: &PgPool, trainer_id: Uuid) -> Result<Vec<TemplateRecord>> {
        let records = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"
            SELECT {TEMPLATE_COLUMNS}
            FROM workout_templates
            WHERE trainer_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Prescriptions for a template, in display/execution order
    pub async fn exercises_for(
        pool: &PgPool,
        template_id: Uuid,
    ) -> Result<Vec<WorkoutExerciseRecord>> {
        let records = sqlx::query_as::<_, WorkoutExerciseRecord>(
            r#"
            SELECT we.id, we.template_id, we.exercise_id, e.name AS exercise_name,
                   we.sets, we.reps, we.rest_seconds, we.load_percentage, we.position, we.notes
            FROM workout_exercises we
            JOIN exercises e ON e.id = we.exercise_id
            WHERE we.template_id = $1
            ORDER BY we.position ASC
            "#,
        )
        .bind(template_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a template (prescriptions cascade)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM workout_templates WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// User workouts
// ============================================================================

/// Scheduled workout instance, joined with the template name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserWorkoutRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub template_id: Uuid,
    pub template_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: String,
    pub notes: String,
}

const USER_WORKOUT_SELECT: &str = r#"
    SELECT uw.id, uw.account_id, uw.template_id, wt.name AS template_name,
           uw.scheduled_at, uw.started_at, uw.completed_at, uw.status, uw.notes
    FROM user_workouts uw
    JOIN workout_templates wt ON wt.id = uw.template_id
"#;

/// User workout repository
pub struct UserWorkoutRepository;

impl UserWorkoutRepository {
    /// Book a template instance; status starts as 'scheduled'
    pub async fn create(
        pool: &PgPool,
        account_id: Uuid,
        template_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<UserWorkoutRecord> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO user_workouts (account_id, template_id, scheduled_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(account_id)
        .bind(template_id)
        .bind(scheduled_at)
        .fetch_one(pool)
        .await?;

        let record = Self::get_by_id(pool, id, account_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted user workout not found"))?;

        Ok(record)
    }

    /// Get one workout, scoped to its owner
    pub async fn get_by_id(
        pool: &PgPool,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<UserWorkoutRecord>> {
        let record = sqlx::query_as::<_, UserWorkoutRecord>(&format!(
            r#"{USER_WORKOUT_SELECT} WHERE uw.id = $1 AND uw.account_id = $2"#,
        ))
        .bind(id)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List an account's workouts, optionally filtered by status
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: Uuid,
        status: Option<&str>,
    ) -> Result<Vec<UserWorkoutRecord>> {
        let records = sqlx::query_as::<_, UserWorkoutRecord>(&format!(
            r#"
            {USER_WORKOUT_SELECT}
            WHERE uw.account_id = $1
              AND ($2::text IS NULL OR uw.status = $2)
            ORDER BY uw.scheduled_at DESC
            "#,
        ))
        .bind(account_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Workouts whose scheduled UTC calendar date equals `today`
    pub async fn list_for_date(
        pool: &PgPool,
        account_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<UserWorkoutRecord>> {
        let records = sqlx::query_as::<_, UserWorkoutRecord>(&format!(
            r#"
            {USER_WORKOUT_SELECT}
            WHERE uw.account_id = $1
              AND (uw.scheduled_at AT TIME ZONE 'UTC')::date = $2
            "#,
        ))
        .bind(account_id)
        .bind(today)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// scheduled -> in_progress; stamps started_at.
    ///
    /// The `status = 'scheduled'` predicate is the compare-and-swap that
    /// makes concurrent transitions safe: of two racing callers at most one
    /// observes the expected status, so at most one UPDATE matches. Returns
    /// None when the workout does not exist, belongs to someone else, or is
    /// not in the expected status.
    pub async fn start(
        pool: &PgPool,
        id: Uuid,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<UserWorkoutRecord>> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE user_workouts
            SET status = 'in_progress', started_at = $3
            WHERE id = $1 AND account_id = $2 AND status = 'scheduled'
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::get_by_id(pool, id, account_id).await,
            None => Ok(None),
        }
    }

    /// in_progress -> completed; stamps completed_at and stores notes.
    /// Same conditional-UPDATE guard as `start`.
    pub async fn complete(
        pool: &PgPool,
        id: Uuid,
        account_id: Uuid,
        now: DateTime<Utc>,
        notes: &str,
    ) -> Result<Option<UserWorkoutRecord>> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE user_workouts
            SET status = 'completed', completed_at = $3, notes = $4
            WHERE id = $1 AND account_id = $2 AND status = 'in_progress'
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(now)
        .bind(notes)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::get_by_id(pool, id, account_id).await,
            None => Ok(None),
        }
    }

    /// scheduled -> skipped (terminal). Same conditional-UPDATE guard.
    pub async fn skip(
        pool: &PgPool,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<UserWorkoutRecord>> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE user_workouts
            SET status = 'skipped'
            WHERE id = $1 AND account_id = $2 AND status = 'scheduled'
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::get_by_id(pool, id, account_id).await,
            None => Ok(None),
        }
    }

    /// Delete a workout, owner-scoped
    pub async fn delete(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query(r#"DELETE FROM user_workouts WHERE id = $1 AND account_id = $2"#)
                .bind(id)
                .bind(account_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
