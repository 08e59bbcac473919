//! Exercise catalog repository: muscle groups, exercises, and their links

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Muscle group record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MuscleGroupRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub equipment: String,
    pub difficulty: String,
    pub is_neural_training: bool,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Link row used when assembling exercises with their muscle groups
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseMuscleGroupRow {
    pub exercise_id: Uuid,
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Input for creating an exercise
#[derive(Debug, Clone)]
pub struct CreateExercise {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub equipment: String,
    pub difficulty: String,
    pub is_neural_training: bool,
    pub muscle_group_ids: Vec<Uuid>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

/// Input for partially updating an exercise
#[derive(Debug, Clone, Default)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub is_neural_training: Option<bool>,
    pub muscle_group_ids: Option<Vec<Uuid>>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

/// Catalog listing filter; all fields are optional and combined with AND
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub neural_training: Option<bool>,
    pub search: Option<String>,
}

const EXERCISE_COLUMNS: &str = "e.id, e.name, e.description, e.instructions, e.equipment, \
                                e.difficulty, e.is_neural_training, e.video_url, e.image_url, \
                                e.created_at";

/// Muscle group repository
pub struct MuscleGroupRepository;

impl MuscleGroupRepository {
    /// Create a muscle group
    pub async fn create(pool: &PgPool, name: &str, description: &str) -> Result<MuscleGroupRecord> {
        let record = sqlx::query_as::<_, MuscleGroupRecord>(
            r#"
            INSERT INTO muscle_groups (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get all muscle groups
    pub async fn get_all(pool: &PgPool) -> Result<Vec<MuscleGroupRecord>> {
        let records = sqlx::query_as::<_, MuscleGroupRecord>(
            r#"SELECT id, name, description FROM muscle_groups ORDER BY name"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Check if a name is taken
    pub async fn name_exists(pool: &PgPool, name: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM muscle_groups WHERE name = $1)"#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Count how many of the given IDs exist (reference validation)
    pub async fn count_existing(pool: &PgPool, ids: &[Uuid]) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM muscle_groups WHERE id = ANY($1)"#,
        )
        .bind(ids)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

/// Exercise repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Create an exercise and its muscle group links in one transaction
    pub async fn create(pool: &PgPool, input: CreateExercise) -> Result<ExerciseRecord> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, ExerciseRecord>(&format!(
            r#"
            INSERT INTO exercises (name, description, instructions, equipment, difficulty,
                                   is_neural_training, video_url, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            EXERCISE_COLUMNS.replace("e.", "")
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.instructions)
        .bind(&input.equipment)
        .bind(&input.difficulty)
        .bind(input.is_neural_training)
        .bind(&input.video_url)
        .bind(&input.image_url)
        .fetch_one(&mut *tx)
        .await?;

        for mg_id in &input.muscle_group_ids {
            sqlx::query(
                r#"INSERT INTO exercise_muscle_groups (exercise_id, muscle_group_id) VALUES ($1, $2)"#,
            )
            .bind(record.id)
            .bind(mg_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(record)
    }

    /// Partially update an exercise; when `muscle_group_ids` is given the
    /// whole link set is replaced in the same transaction
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateExercise,
    ) -> Result<Option<ExerciseRecord>> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, ExerciseRecord>(&format!(
            r#"
            UPDATE exercises SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                instructions = COALESCE($4, instructions),
                equipment = COALESCE($5, equipment),
                difficulty = COALESCE($6, difficulty),
                is_neural_training = COALESCE($7, is_neural_training),
                video_url = COALESCE($8, video_url),
                image_url = COALESCE($9, image_url)
            WHERE id = $1
            RETURNING {}
            "#,
            EXERCISE_COLUMNS.replace("e.", "")
        ))
        .bind(id)
        .bind(updates.name)
        .bind(updates.description)
        .bind(updates.instructions)
        .bind(updates.equipment)
        .bind(updates.difficulty)
        .bind(updates.is_neural_training)
        .bind(updates.video_url)
        .bind(updates.image_url)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = record else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(mg_ids) = updates.muscle_group_ids {
            sqlx::query(r#"DELETE FROM exercise_muscle_groups WHERE exercise_id = $1"#)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for mg_id in mg_ids {
                sqlx::query(
                    r#"INSERT INTO exercise_muscle_groups (exercise_id, muscle_group_id) VALUES ($1, $2)"#,
                )
                .bind(id)
                .bind(mg_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(record))
    }

    /// Get exercise by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ExerciseRecord>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(&format!(
            r#"SELECT {EXERCISE_COLUMNS} FROM exercises e WHERE e.id = $1"#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List exercises applying the optional catalog filters
    pub async fn list(pool: &PgPool, filter: &CatalogFilter) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(&format!(
            r#"
            SELECT DISTINCT {EXERCISE_COLUMNS}
            FROM exercises e
            LEFT JOIN exercise_muscle_groups emg ON emg.exercise_id = e.id
            LEFT JOIN muscle_groups mg ON mg.id = emg.muscle_group_id
            WHERE ($1::text IS NULL OR mg.name = $1)
              AND ($2::text IS NULL OR e.equipment = $2)
              AND ($3::text IS NULL OR e.difficulty = $3)
              AND ($4::boolean IS NULL OR e.is_neural_training = $4)
              AND ($5::text IS NULL
                   OR e.name ILIKE '%' || $5 || '%'
                   OR e.description ILIKE '%' || $5 || '%')
            ORDER BY e.name
            "#,
        ))
        .bind(&filter.muscle_group)
        .bind(&filter.equipment)
        .bind(&filter.difficulty)
        .bind(filter.neural_training)
        .bind(&filter.search)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Dedicated read path for neural-training exercises
    pub async fn list_neural_training(pool: &PgPool) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(&format!(
            r#"
            SELECT {EXERCISE_COLUMNS}
            FROM exercises e
            WHERE e.is_neural_training = TRUE
            ORDER BY e.name
            "#,
        ))
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Muscle groups for a set of exercises, keyed by exercise ID
    pub async fn muscle_groups_for(
        pool: &PgPool,
        exercise_ids: &[Uuid],
    ) -> Result<Vec<ExerciseMuscleGroupRow>> {
        let records = sqlx::query_as::<_, ExerciseMuscleGroupRow>(
            r#"
            SELECT emg.exercise_id, mg.id, mg.name, mg.description
            FROM exercise_muscle_groups emg
            JOIN muscle_groups mg ON mg.id = emg.muscle_group_id
            WHERE emg.exercise_id = ANY($1)
            ORDER BY mg.name
            "#,
        )
        .bind(exercise_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Check an exercise exists (reference validation for template specs)
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result =
            sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM exercises WHERE id = $1)"#)
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(result)
    }
}
