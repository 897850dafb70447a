use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::ApiError;
use crate::entities::approval_documents::DocumentStatus;

pub const MIN_BIRTH_YEAR: i32 = 1900;

pub const OCCUPATIONS: [&str; 6] = [
    "Software Developer",
    "Data Analyst",
    "Accountant",
    "HR Officer",
    "Marketer",
    "Designer",
];

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

/// Trims `value` and requires it to be non-empty and at most `max_chars` characters.
pub fn required_text(value: Option<&str>, field: &str, max_chars: usize) -> Result<String, ApiError> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(ApiError::validation(format!(
            "{field} must be {max_chars} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but blank input becomes `None`.
pub fn optional_text(
    value: Option<&str>,
    field: &str,
    max_chars: usize,
) -> Result<Option<String>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(Some(text), field, max_chars).map(Some),
    }
}

pub fn validate_birth_date(date: NaiveDate, today: NaiveDate, field: &str) -> Result<NaiveDate, ApiError> {
    if date > today || date.year() < MIN_BIRTH_YEAR {
        return Err(ApiError::validation(format!("{field} is invalid")));
    }
    Ok(date)
}

/// Completed years between `birth` and `today`, never negative.
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0)
}

pub fn parse_decision(action: Option<&str>) -> Result<DocumentStatus, ApiError> {
    match action.unwrap_or_default().trim().to_lowercase().as_str() {
        "approved" => Ok(DocumentStatus::Approved),
        "rejected" => Ok(DocumentStatus::Rejected),
        _ => Err(ApiError::validation(
            "Action must be 'approved' or 'rejected'",
        )),
    }
}

/// Removes duplicate ids, keeping first occurrences in order.
pub fn normalize_ids(ids: &[i32]) -> Result<Vec<i32>, ApiError> {
    let mut seen = HashSet::new();
    let unique: Vec<i32> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

    if unique.is_empty() {
        return Err(ApiError::validation("Select at least one item"));
    }
    Ok(unique)
}

pub fn validate_occupation(occupation: &str) -> Result<(), ApiError> {
    if !OCCUPATIONS.contains(&occupation) {
        return Err(ApiError::validation("Occupation is not valid"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(
        &RE,
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$",
    );

    if email.len() > 120 || email.contains("..") || !re.is_match(email) {
        return Err(ApiError::validation("Email format is invalid"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ApiError> {
    if !(9..=15).contains(&phone.len()) || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::validation(
            "Phone number must be 9-15 digits",
        ));
    }
    Ok(())
}

pub fn validate_sex(sex: &str) -> Result<(), ApiError> {
    if !matches!(sex, "Male" | "Female") {
        return Err(ApiError::validation("Sex must be 'Male' or 'Female'"));
    }
    Ok(())
}

/// Accepts `data:image/<type>;base64,<payload>` where the payload decodes to a known
/// image format.
pub fn validate_profile_image(value: &str) -> Result<(), ApiError> {
    if !is_image_data_url(value) {
        return Err(ApiError::validation(
            "Profile image must be a valid base64 encoded image",
        ));
    }
    Ok(())
}

fn is_image_data_url(value: &str) -> bool {
    let Some((meta, payload)) = value.split_once(',') else {
        return false;
    };

    if !meta
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:image/"))
    {
        return false;
    }
    if !meta.to_ascii_lowercase().contains(";base64") {
        return false;
    }
    if payload.len() < 16 || payload.len() % 4 != 0 {
        return false;
    }

    STANDARD
        .decode(payload)
        .is_ok_and(|bytes| has_image_signature(&bytes))
}

/// PNG, JPEG, GIF, WEBP or BMP magic bytes
#[must_use]
pub fn has_image_signature(bytes: &[u8]) -> bool {
    if bytes.len() < 8 {
        return false;
    }

    bytes.starts_with(&[0x89, b'P', b'N', b'G'])
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"GIF8")
        || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
        || bytes.starts_with(b"BM")
}

/// `XXXX-XXXX-XXXX-XXXX`, digits only
pub fn validate_numeric_code(code: Option<&str>) -> Result<String, ApiError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(&RE, r"^[0-9]{4}(-[0-9]{4}){3}$");

    let code = code.unwrap_or_default().trim();
    if !re.is_match(code) {
        return Err(ApiError::validation(
            "Code must look like XXXX-XXXX-XXXX-XXXX and contain digits only",
        ));
    }
    Ok(code.to_string())
}

/// Six dash-separated groups of five `A-Z` / `0-9` characters
pub fn validate_alphanumeric_code(code: Option<&str>) -> Result<String, ApiError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(&RE, r"^[A-Z0-9]{5}(-[A-Z0-9]{5}){5}$");

    let code = code.unwrap_or_default().trim();
    if !re.is_match(code) {
        return Err(ApiError::validation(
            "Code must look like XXXXX-XXXXX-XXXXX-XXXXX-XXXXX-XXXXX using A-Z and 0-9",
        ));
    }
    Ok(code.to_string())
}

pub fn validate_answers(answers: &[i32], question_count: usize) -> Result<(), ApiError> {
    if answers.len() != question_count {
        return Err(ApiError::validation("Number of answers is incorrect"));
    }
    if answers.iter().any(|a| !(0..=3).contains(a)) {
        return Err(ApiError::validation("Answer format is invalid"));
    }
    Ok(())
}
