use axum::{
    Extension, Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState, LoginResponse, MessageResponse, UserInfoResponse};
use crate::security::SessionClaims;
use crate::services::AuthError;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::LockedOut { .. } => Self::Forbidden(err.to_string()),
            AuthError::UserNotFound => Self::NotFound(err.to_string()),
            AuthError::Token(_) => Self::unauthorized(),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <token>` and exposes the verified claims to handlers.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;

    let claims = state.auth_service.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        ApiError::unauthorized()
    })?;

    tracing::Span::current().record("user_id", claims.sub.as_str());
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        let token = token.trim();
        return (!token.is_empty()).then_some(token);
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .auth_service
        .register(
            payload.username.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
            payload.confirm_password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(MessageResponse::new("Registration successful")))
}

/// POST /auth/login
/// Verifies credentials and returns a signed session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = payload.username.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Unauthorized(
            AuthError::InvalidCredentials.to_string(),
        ));
    }

    let login = state.auth_service.authenticate(username, password).await?;

    Ok(Json(LoginResponse {
        user_id: login.user_id,
        username: login.username,
        token: login.token,
        expires_at_utc: login.expires_at,
    }))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let user_id = claims.user_id().ok_or_else(ApiError::unauthorized)?;
    let user = state.auth_service.get_user_info(user_id).await?;

    Ok(Json(UserInfoResponse {
        id: user.id,
        username: user.username,
        created_at_utc: user.created_at,
        last_login_at_utc: user.last_login_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&headers("Bearer   ")), None);
        assert_eq!(extract_bearer_token(&headers("Basic abc")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::LockedOut {
                until: chrono::Utc::now()
            }),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::Validation("bad".into())),
            ApiError::ValidationError(_)
        ));
    }
}
