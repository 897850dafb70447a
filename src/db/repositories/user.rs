use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};

use crate::entities::{prelude::*, user_accounts};
use crate::security::PasswordHash;

/// Account data returned from repository (without password material)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<user_accounts::Model> for User {
    fn from(model: user_accounts::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}

/// Everything needed to decide a login attempt
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: i32,
    pub username: String,
    pub password: PasswordHash,
    pub failed_login_count: i32,
    pub lockout_end: Option<DateTime<Utc>>,
}

impl From<user_accounts::Model> for Credential {
    fn from(model: user_accounts::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: PasswordHash {
                hash: model.password_hash,
                salt: model.password_salt,
            },
            failed_login_count: model.failed_login_count,
            lockout_end: model.lockout_end,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_credential(&self, normalized_username: &str) -> Result<Option<Credential>> {
        let user = UserAccounts::find()
            .filter(user_accounts::Column::NormalizedUsername.eq(normalized_username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(Credential::from))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = UserAccounts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn exists(&self, normalized_username: &str) -> Result<bool> {
        let count = UserAccounts::find()
            .filter(user_accounts::Column::NormalizedUsername.eq(normalized_username))
            .count(&self.conn)
            .await
            .context("Failed to check username")?;

        Ok(count > 0)
    }

    /// Returns `None` when the normalized username is already taken.
    pub async fn create(
        &self,
        username: &str,
        normalized_username: &str,
        password: PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<Option<User>> {
        let active = user_accounts::ActiveModel {
            username: Set(username.to_string()),
            normalized_username: Set(normalized_username.to_string()),
            password_hash: Set(password.hash),
            password_salt: Set(password.salt),
            failed_login_count: Set(0),
            lockout_end: Set(None),
            created_at: Set(now),
            last_login_at: Set(None),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Some(User::from(model))),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    /// Persists the failure counter and, when one was triggered, the lockout end.
    pub async fn record_login_failure(
        &self,
        id: i32,
        failed_login_count: i32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        UserAccounts::update(user_accounts::ActiveModel {
            id: Unchanged(id),
            failed_login_count: Set(failed_login_count),
            lockout_end: Set(lockout_end),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to record login failure")?;

        Ok(())
    }

    pub async fn record_login_success(&self, id: i32, now: DateTime<Utc>) -> Result<()> {
        UserAccounts::update(user_accounts::ActiveModel {
            id: Unchanged(id),
            failed_login_count: Set(0),
            lockout_end: Set(None),
            last_login_at: Set(Some(now)),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to record login success")?;

        Ok(())
    }
}
