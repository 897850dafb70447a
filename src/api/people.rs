use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{age_on, optional_text, required_text, validate_birth_date};
use super::{ApiError, AppState, PersonDto};
use crate::db::NewPerson;

const MAX_NAME_CHARS: usize = 80;
const MAX_REMARK_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub remark: Option<String>,
}

pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PersonDto>>, ApiError> {
    let people = state.store().list_people().await?;
    Ok(Json(people.into_iter().map(PersonDto::from).collect()))
}

pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<PersonDto>, ApiError> {
    let person = state
        .store()
        .get_person(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(person.into()))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let today = now.date_naive();

    let first_name = required_text(payload.first_name.as_deref(), "First name", MAX_NAME_CHARS)?;
    let last_name = required_text(payload.last_name.as_deref(), "Last name", MAX_NAME_CHARS)?;
    let birth_date = payload
        .birth_date
        .ok_or_else(|| ApiError::validation("Birth date is required"))?;
    let birth_date = validate_birth_date(birth_date, today, "Birth date")?;
    let remark = optional_text(payload.remark.as_deref(), "Remark", MAX_REMARK_CHARS)?;

    let person = state
        .store()
        .add_person(
            NewPerson {
                first_name,
                last_name,
                birth_date,
                age: age_on(birth_date, today),
                remark,
            },
            now,
        )
        .await?;

    tracing::info!(person_id = person.id, "Created person");

    let location = format!("/api/people/{}", person.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PersonDto::from(person)),
    ))
}
