use axum::{Json, extract::State};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{
    OCCUPATIONS, required_text, validate_birth_date, validate_email, validate_occupation,
    validate_phone, validate_profile_image, validate_sex,
};
use super::{ApiError, AppState, ProfileSavedResponse};
use crate::db::NewProfile;

/// Upper bound for the base64 data URL, roughly a 4.5 MB image.
pub const MAX_PROFILE_IMAGE_CHARS: usize = 6_000_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_base64: Option<String>,
    pub occupation: Option<String>,
    pub sex: Option<String>,
    pub birth_day: Option<NaiveDate>,
}

pub async fn list_occupations() -> Json<Vec<&'static str>> {
    Json(OCCUPATIONS.to_vec())
}

pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<Json<ProfileSavedResponse>, ApiError> {
    let now = Utc::now();

    let first_name = required_text(payload.first_name.as_deref(), "First name", 80)?;
    let last_name = required_text(payload.last_name.as_deref(), "Last name", 80)?;
    let email = required_text(payload.email.as_deref(), "Email", 120)?;
    let phone = required_text(payload.phone.as_deref(), "Phone", 30)?;
    let profile_image = required_text(
        payload.profile_base64.as_deref(),
        "Profile image",
        MAX_PROFILE_IMAGE_CHARS,
    )?;
    let occupation = required_text(payload.occupation.as_deref(), "Occupation", 80)?;
    let sex = required_text(payload.sex.as_deref(), "Sex", 20)?;
    let birth_day = payload
        .birth_day
        .ok_or_else(|| ApiError::validation("Birth day is required"))?;

    validate_occupation(&occupation)?;
    validate_email(&email)?;
    validate_phone(&phone)?;
    let birth_day = validate_birth_date(birth_day, now.date_naive(), "Birth day")?;
    validate_profile_image(&profile_image)?;
    validate_sex(&sex)?;

    let profile = state
        .store()
        .add_profile(
            NewProfile {
                first_name,
                last_name,
                email,
                phone,
                profile_image,
                occupation,
                sex,
                birth_day,
            },
            now,
        )
        .await?;

    tracing::info!(profile_id = profile.id, "Saved profile");

    Ok(Json(ProfileSavedResponse {
        id: profile.id,
        message: format!("save data success id : {:05}", profile.id),
    }))
}
