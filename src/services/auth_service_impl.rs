//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::task;
use tracing::{info, warn};

use crate::config::LockoutConfig;
use crate::db::Store;
use crate::security::{
    SessionClaims, TokenService, hash_password, is_strong_password, is_valid_username,
    normalize_username, verify_password,
};
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};

const USERNAME_RULES: &str =
    "Username must be 4-30 characters and use only letters, digits, '.', '_' or '-'";
const PASSWORD_RULES: &str = "Password must be at least 8 characters and include an uppercase letter, a lowercase letter, a digit and a symbol";
const USERNAME_TAKEN: &str = "Username is already taken";

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenService,
    lockout: LockoutConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenService, lockout: LockoutConfig) -> Self {
        Self {
            store,
            tokens,
            lockout,
        }
    }

    fn max_attempts(&self) -> i32 {
        i32::try_from(self.lockout.max_attempts).unwrap_or(i32::MAX)
    }

    fn lockout_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.lockout.lockout_minutes))
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserInfo, AuthError> {
        let username = username.trim();

        if !is_valid_username(username) {
            return Err(AuthError::Validation(USERNAME_RULES.to_string()));
        }

        if password != confirm_password {
            return Err(AuthError::Validation(
                "Password and confirmation do not match".to_string(),
            ));
        }

        if !is_strong_password(password) {
            return Err(AuthError::Validation(PASSWORD_RULES.to_string()));
        }

        let normalized = normalize_username(username);
        if self.store.username_exists(&normalized).await? {
            return Err(AuthError::Validation(USERNAME_TAKEN.to_string()));
        }

        // PBKDF2 is CPU-bound; keep it off the async workers
        let password = password.to_string();
        let hashed = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?;

        // A concurrent registration can still win the unique index
        let user = self
            .store
            .create_user(username, &normalized, hashed, Utc::now())
            .await?
            .ok_or_else(|| AuthError::Validation(USERNAME_TAKEN.to_string()))?;

        info!(user_id = user.id, "Registered user {}", user.username);
        Ok(user.into())
    }

    async fn authenticate_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginResult, AuthError> {
        let normalized = normalize_username(username);

        let Some(credential) = self.store.get_credential(&normalized).await? else {
            metrics::counter!("auth_login_failures_total").increment(1);
            return Err(AuthError::InvalidCredentials);
        };

        if let Some(until) = credential.lockout_end.filter(|end| *end > now) {
            warn!(user_id = credential.id, "Login refused, account locked until {until}");
            return Err(AuthError::LockedOut { until });
        }

        let stored = credential.password.clone();
        let attempt = password.to_string();
        let valid = task::spawn_blocking(move || {
            verify_password(&attempt, &stored.hash, &stored.salt)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))?;

        if !valid {
            metrics::counter!("auth_login_failures_total").increment(1);

            let failures = credential.failed_login_count.saturating_add(1);
            if failures >= self.max_attempts() {
                let until = now + self.lockout_duration();
                self.store
                    .record_login_failure(credential.id, 0, Some(until))
                    .await?;
                metrics::counter!("auth_lockouts_total").increment(1);
                warn!(
                    user_id = credential.id,
                    "Account locked after {failures} failed logins, until {until}"
                );
            } else {
                self.store
                    .record_login_failure(credential.id, failures, None)
                    .await?;
            }

            return Err(AuthError::InvalidCredentials);
        }

        self.store.record_login_success(credential.id, now).await?;

        let issued = self
            .tokens
            .issue_at(credential.id, &credential.username, now)?;

        info!(user_id = credential.id, "User {} logged in", credential.username);

        Ok(LoginResult {
            user_id: credential.id,
            username: credential.username,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }

    async fn get_user_info(&self, user_id: i32) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.into())
    }
}
