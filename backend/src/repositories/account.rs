//! Account repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub profile_picture_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Input for self-service account updates (contact/physical fields only)
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub profile_picture_url: Option<String>,
}

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, phone, birth_date, \
                               height_m, weight_kg, profile_picture_url, is_active, \
                               created_at, updated_at";

/// Account repository
pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account; role defaults to 'client' at the schema level
    pub async fn create(pool: &PgPool, input: CreateAccount) -> Result<AccountRecord> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            INSERT INTO accounts (username, email, password_hash, phone, birth_date, height_m, weight_kg)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.phone)
        .bind(input.birth_date)
        .bind(input.height_m)
        .bind(input.weight_kg)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find account by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"#,
        ))
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Find account by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check if a username is taken
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Check if an email is taken
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Update contact and physical attributes
    pub async fn update_contact(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateAccount,
    ) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            UPDATE accounts SET
                phone = COALESCE($2, phone),
                birth_date = COALESCE($3, birth_date),
                height_m = COALESCE($4, height_m),
                weight_kg = COALESCE($5, weight_kg),
                profile_picture_url = COALESCE($6, profile_picture_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(updates.phone)
        .bind(updates.birth_date)
        .bind(updates.height_m)
        .bind(updates.weight_kg)
        .bind(updates.profile_picture_url)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Administrative role change
    pub async fn set_role(pool: &PgPool, id: Uuid, role: &str) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            UPDATE accounts SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Administrative soft deactivation; accounts are never hard-deleted
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            UPDATE accounts SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
