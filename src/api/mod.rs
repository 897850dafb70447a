use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, QueueService};
use crate::state::SharedState;

pub mod auth;
mod comments;
mod documents;
mod error;
mod exam;
mod observability;
mod people;
mod product_codes;
mod profiles;
mod questions;
mod queue;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

/// Leaves room for the base64 profile image on top of the other fields.
const PROFILE_BODY_LIMIT: usize = profiles::MAX_PROFILE_IMAGE_CHARS + 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub auth_service: Arc<dyn AuthService>,

    pub queue_service: Arc<dyn QueueService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        auth_service: shared.auth_service.clone(),
        queue_service: shared.queue_service.clone(),
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .merge(create_public_router())
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/people",
            get(people::list_people).post(people::create_person),
        )
        .route("/people/{id}", get(people::get_person))
        .route("/it03/documents", get(documents::list_documents))
        .route("/it03/documents/decision", post(documents::decide))
        .route("/it03/documents/reset", post(documents::reset))
        .route("/it04/occupations", get(profiles::list_occupations))
        .route(
            "/it04/profiles",
            post(profiles::create_profile).layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT)),
        )
        .route("/it05/issue", post(queue::issue))
        .route("/it05/current", get(queue::current))
        .route("/it05/clear", post(queue::clear))
        .route(
            "/it06/codes",
            get(product_codes::list_numeric).post(product_codes::add_numeric),
        )
        .route("/it06/codes/{id}", delete(product_codes::remove_numeric))
        .route(
            "/it07/codes",
            get(product_codes::list_alphanumeric).post(product_codes::add_alphanumeric),
        )
        .route(
            "/it07/codes/{id}",
            delete(product_codes::remove_alphanumeric),
        )
        .route(
            "/it08/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/it08/questions/{id}", delete(questions::delete_question))
        .route("/it09/thread", get(comments::get_thread))
        .route("/it09/comments", post(comments::add_comment))
        .route("/it10/questions", get(exam::list_questions))
        .route("/it10/submit", post(exam::submit))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
