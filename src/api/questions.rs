use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::validation::required_text;
use super::{ApiError, AppState, MessageResponse, QuestionDto};
use crate::db::NewQuestion;

const MAX_QUESTION_CHARS: usize = 300;
const MAX_CHOICE_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub question_text: Option<String>,
    pub choice1: Option<String>,
    pub choice2: Option<String>,
    pub choice3: Option<String>,
    pub choice4: Option<String>,
}

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuestionDto>>, ApiError> {
    let questions = state.store().list_questions().await?;
    Ok(Json(questions.into_iter().map(QuestionDto::from).collect()))
}

/// Appends a question after the current last one.
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<Json<QuestionDto>, ApiError> {
    let question_text = required_text(
        payload.question_text.as_deref(),
        "Question",
        MAX_QUESTION_CHARS,
    )?;
    let choices = [
        required_text(payload.choice1.as_deref(), "Choice 1", MAX_CHOICE_CHARS)?,
        required_text(payload.choice2.as_deref(), "Choice 2", MAX_CHOICE_CHARS)?,
        required_text(payload.choice3.as_deref(), "Choice 3", MAX_CHOICE_CHARS)?,
        required_text(payload.choice4.as_deref(), "Choice 4", MAX_CHOICE_CHARS)?,
    ];

    let question = state
        .store()
        .add_question(
            NewQuestion {
                question_text,
                choices,
            },
            Utc::now(),
        )
        .await?;

    tracing::info!(
        question_id = question.id,
        display_order = question.display_order,
        "Added question"
    );
    Ok(Json(question.into()))
}

/// Deletes a question; the remaining ones are renumbered from 1.
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store().remove_question(id).await? {
        return Err(ApiError::NotFound(
            "Question to delete was not found".to_string(),
        ));
    }

    tracing::info!(question_id = id, "Deleted question");
    Ok(Json(MessageResponse::new("Question deleted")))
}
