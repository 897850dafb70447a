use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{normalize_ids, parse_decision, required_text};
use super::{ApiError, AppState, DocumentDto, MessageResponse};
use crate::db::DecisionOutcome;

const MAX_REASON_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub ids: Vec<i32>,
    pub action: Option<String>,
    pub reason: Option<String>,
}

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DocumentDto>>, ApiError> {
    let documents = state.store().list_documents().await?;
    Ok(Json(documents.into_iter().map(DocumentDto::from).collect()))
}

/// Approves or rejects a batch of pending documents. Either every id is updated or none is.
pub async fn decide(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DecisionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = parse_decision(payload.action.as_deref())?;
    let reason = required_text(payload.reason.as_deref(), "Reason", MAX_REASON_CHARS)?;
    let ids = normalize_ids(&payload.ids)?;

    match state
        .store()
        .decide_documents(&ids, status, &reason, Utc::now())
        .await?
    {
        DecisionOutcome::Applied(count) => {
            tracing::info!(count, ?status, "Recorded document decision");
            Ok(Json(MessageResponse::new("Status saved")))
        }
        DecisionOutcome::Missing(missing) => {
            tracing::debug!(?missing, "Decision referenced unknown documents");
            Err(ApiError::validation("Some documents were not found"))
        }
        DecisionOutcome::NotPending(ids) => {
            tracing::debug!(?ids, "Decision targeted documents that are not pending");
            Err(ApiError::validation("Only pending documents can be decided"))
        }
    }
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, ApiError> {
    let count = state.store().reset_documents(Utc::now()).await?;

    if count == 0 {
        return Ok(Json(MessageResponse::new("No documents to reset")));
    }

    tracing::info!(count, "Documents reset to seeded state");
    Ok(Json(MessageResponse::new("Documents reset to defaults")))
}
