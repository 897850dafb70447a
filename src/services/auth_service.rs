//! Domain service for account registration, login and session lookup.
//!
//! Owns the lockout policy: repeated failed logins lock an account for a while,
//! and a locked account refuses even the correct password until the lock expires.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::db::User;
use crate::security::{SessionClaims, TokenError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    /// Deliberately says nothing about which half of the pair was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is temporarily locked, try again later")]
    LockedOut { until: DateTime<Utc> },

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Successful login: the account and a signed session token.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: i32,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a malformed or taken username, a confirmation
    /// mismatch, or a weak password.
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserInfo, AuthError>;

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or wrong password and
    /// [`AuthError::LockedOut`] while the account is locked.
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        self.authenticate_at(username, password, Utc::now()).await
    }

    /// [`AuthService::authenticate`] with an explicit clock.
    async fn authenticate_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginResult, AuthError>;

    /// Validates a bearer token and returns its claims.
    fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Gets information for a specific account.
    async fn get_user_info(&self, user_id: i32) -> Result<UserInfo, AuthError>;
}
