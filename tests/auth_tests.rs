//! Lockout policy driven through the auth service with an explicit clock.

use chrono::{Duration, Utc};
use quiz_api::config::{Config, JwtConfig, LockoutConfig};
use quiz_api::db::Store;
use quiz_api::security::TokenService;
use quiz_api::services::{AuthError, AuthService, SeaOrmAuthService};

const PASSWORD: &str = "Corr3ct!Horse";
const WRONG: &str = "Wr0ng!Horse";

async fn service() -> SeaOrmAuthService {
    let db_path =
        std::env::temp_dir().join(format!("quiz-api-auth-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store");

    let jwt = JwtConfig {
        secret: "auth-service-test-secret-0123456789abcdef".to_string(),
        ..JwtConfig::default()
    };
    let tokens = TokenService::new(&jwt).expect("valid secret");

    let service = SeaOrmAuthService::new(store, tokens, LockoutConfig::default());
    service
        .register("frank", PASSWORD, PASSWORD)
        .await
        .expect("registration succeeds");
    service
}

#[tokio::test]
async fn test_lockout_blocks_correct_password_until_expiry() {
    let service = service().await;
    let start = Utc::now();

    for attempt in 1..=5 {
        let err = service
            .authenticate_at("frank", WRONG, start)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AuthError::InvalidCredentials),
            "attempt {attempt}: {err:?}"
        );
    }

    let err = service
        .authenticate_at("frank", PASSWORD, start + Duration::minutes(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::LockedOut { .. }));

    let err = service
        .authenticate_at("frank", PASSWORD, start + Duration::minutes(9))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::LockedOut { .. }));

    let login = service
        .authenticate_at("frank", PASSWORD, start + Duration::minutes(11))
        .await
        .expect("lock expired");
    assert_eq!(login.username, "frank");
}

#[tokio::test]
async fn test_counter_restarts_after_lockout() {
    let service = service().await;
    let start = Utc::now();

    for _ in 0..5 {
        let _ = service.authenticate_at("frank", WRONG, start).await;
    }

    // After expiry the counter starts from zero: four failures do not lock again
    let later = start + Duration::minutes(11);
    for _ in 0..4 {
        let err = service
            .authenticate_at("frank", WRONG, later)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    assert!(service.authenticate_at("frank", PASSWORD, later).await.is_ok());
}

#[tokio::test]
async fn test_issued_token_verifies() {
    let service = service().await;

    let login = service.authenticate("FRANK", PASSWORD).await.unwrap();
    let claims = service.verify_token(&login.token).unwrap();

    assert_eq!(claims.user_id(), Some(login.user_id));
    assert_eq!(claims.name, "frank");
    assert_eq!(claims.iss, Config::default().security.jwt.issuer);

    let info = service.get_user_info(login.user_id).await.unwrap();
    assert!(info.last_login_at.is_some());
}

#[tokio::test]
async fn test_unknown_user_info() {
    let service = service().await;

    let err = service.get_user_info(9999).await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}
