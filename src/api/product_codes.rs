//! Product code registers. `/it06` holds numeric codes and `/it07` alphanumeric
//! ones; both share the handlers below and differ only in the format check.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_alphanumeric_code, validate_numeric_code};
use super::{ApiError, AppState, MessageResponse, ProductCodeDto};
use crate::db::CodeRegistry;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCodeRequest {
    pub product_code: Option<String>,
}

fn validate_code(registry: CodeRegistry, code: Option<&str>) -> Result<String, ApiError> {
    match registry {
        CodeRegistry::Numeric => validate_numeric_code(code),
        CodeRegistry::Alphanumeric => validate_alphanumeric_code(code),
    }
}

async fn list_codes(
    state: &AppState,
    registry: CodeRegistry,
) -> Result<Json<Vec<ProductCodeDto>>, ApiError> {
    let codes = state.store().list_product_codes(registry).await?;
    Ok(Json(codes.into_iter().map(ProductCodeDto::from).collect()))
}

async fn add_code(
    state: &AppState,
    registry: CodeRegistry,
    payload: AddCodeRequest,
) -> Result<Json<ProductCodeDto>, ApiError> {
    let code = validate_code(registry, payload.product_code.as_deref())?;

    if state.store().product_code_exists(registry, &code).await? {
        return Err(ApiError::validation("Product code already exists"));
    }

    // A concurrent insert can still win the race; the unique index reports it as `None`.
    let added = state
        .store()
        .add_product_code(registry, &code, Utc::now())
        .await?
        .ok_or_else(|| ApiError::validation("Product code already exists"))?;

    tracing::info!(?registry, id = added.id, "Added product code");
    Ok(Json(added.into()))
}

async fn remove_code(
    state: &AppState,
    registry: CodeRegistry,
    id: i32,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store().remove_product_code(registry, id).await? {
        return Err(ApiError::NotFound("Record to delete was not found".to_string()));
    }

    tracing::info!(?registry, id, "Removed product code");
    Ok(Json(MessageResponse::new("Deleted successfully")))
}

// Numeric (/it06)

pub async fn list_numeric(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductCodeDto>>, ApiError> {
    list_codes(&state, CodeRegistry::Numeric).await
}

pub async fn add_numeric(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddCodeRequest>,
) -> Result<Json<ProductCodeDto>, ApiError> {
    add_code(&state, CodeRegistry::Numeric, payload).await
}

pub async fn remove_numeric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_code(&state, CodeRegistry::Numeric, id).await
}

// Alphanumeric (/it07)

pub async fn list_alphanumeric(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductCodeDto>>, ApiError> {
    list_codes(&state, CodeRegistry::Alphanumeric).await
}

pub async fn add_alphanumeric(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddCodeRequest>,
) -> Result<Json<ProductCodeDto>, ApiError> {
    add_code(&state, CodeRegistry::Alphanumeric, payload).await
}

pub async fn remove_alphanumeric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_code(&state, CodeRegistry::Alphanumeric, id).await
}
