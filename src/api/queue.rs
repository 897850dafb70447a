use axum::{Json, extract::State};
use std::sync::Arc;

use super::{
    ApiError, AppState, ClearedTicketResponse, CurrentTicketResponse, IssuedTicketResponse,
};
use crate::services::QueueError;

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Database(msg) => Self::DatabaseError(msg),
            QueueError::Internal(msg) => Self::internal(msg),
        }
    }
}

pub async fn issue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IssuedTicketResponse>, ApiError> {
    let ticket = state.queue_service.issue().await?;

    Ok(Json(IssuedTicketResponse {
        queue_number: ticket.code,
        issued_at_utc: ticket.at,
    }))
}

pub async fn current(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentTicketResponse>, ApiError> {
    let ticket = state.queue_service.current().await?;

    Ok(Json(CurrentTicketResponse {
        queue_number: ticket.code,
        updated_at_utc: ticket.at,
    }))
}

pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearedTicketResponse>, ApiError> {
    let ticket = state.queue_service.clear().await?;

    Ok(Json(ClearedTicketResponse {
        queue_number: ticket.code,
        cleared_at_utc: ticket.at,
    }))
}
