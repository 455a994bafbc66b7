//! User manager: registration with blacklist screening, and lookups.

use super::{
    errors::{UserError, UserResult},
    models::{CreateUserRequest, User},
};
use crate::screening::Screener;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

/// User manager
#[derive(Clone)]
pub struct UserManager {
    pool: Arc<PgPool>,
    screener: Arc<dyn Screener>,
}

impl UserManager {
    /// Create a new user manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `screener` - Blacklist provider consulted before every signup
    pub fn new(pool: Arc<PgPool>, screener: Arc<dyn Screener>) -> Self {
        Self { pool, screener }
    }

    /// Register a new user.
    ///
    /// The email is screened first; registration proceeds only on an
    /// all-clear report. A flagged report refuses the signup, and so does a
    /// failed lookup (fail closed).
    ///
    /// # Arguments
    ///
    /// * `request` - Name and email to register
    ///
    /// # Returns
    ///
    /// * `UserResult<User>` - The created user
    ///
    /// # Errors
    ///
    /// * `UserError::InvalidDetails` - Empty name or implausible email
    /// * `UserError::EmailBlacklisted` - Provider flagged the email
    /// * `UserError::ScreeningUnavailable` - Provider could not be consulted
    /// * `UserError::AlreadyExists` - Email already registered
    pub async fn register(&self, request: CreateUserRequest) -> UserResult<User> {
        let name = request.name.trim();
        let email = request.email.trim();

        if name.is_empty() {
            return Err(UserError::InvalidDetails("name must not be empty".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::InvalidDetails(
                "email must be a valid address".to_string(),
            ));
        }

        let report = self.screener.check_email(email).await?;
        if !report.is_clear() {
            tracing::warn!(email = %email, reason = ?report.reason, "signup refused by blacklist");
            return Err(UserError::EmailBlacklisted);
        }

        let existing = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if existing.is_some() {
            return Err(UserError::AlreadyExists);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            // Two racing signups can both pass the pre-check; the unique
            // constraint settles it.
            if is_unique_violation(&e) {
                UserError::AlreadyExists
            } else {
                UserError::Database(e)
            }
        })?;

        let user = user_from_row(&row);
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Find a user by id
    ///
    /// # Arguments
    ///
    /// * `id` - User ID
    ///
    /// # Returns
    ///
    /// * `UserResult<Option<User>>` - The user, if one exists
    pub async fn find_user(&self, id: Uuid) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }
}
