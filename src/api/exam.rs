use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{required_text, validate_answers};
use super::{ApiError, AppState, ExamQuestionDto, ExamQuestionsResponse, ExamResultDto};

const MAX_FULL_NAME_CHARS: usize = 160;

struct ExamQuestion {
    id: i32,
    text: &'static str,
    choices: &'static [&'static str],
    correct_index: i32,
}

static QUESTIONS: [ExamQuestion; 2] = [
    ExamQuestion {
        id: 1,
        text: "Which of the following is an odd number?",
        choices: &["3", "5", "9", "11"],
        correct_index: 0,
    },
    ExamQuestion {
        id: 2,
        text: "2 x ? = 2 + 4, find x",
        choices: &["1", "2", "3", "4"],
        correct_index: 1,
    },
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamRequest {
    pub full_name: Option<String>,
    #[serde(default)]
    pub answers: Vec<i32>,
}

/// Number of answers matching the key, position by position.
fn score_answers(answers: &[i32]) -> i32 {
    let correct = QUESTIONS
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_index == **answer)
        .count();
    i32::try_from(correct).unwrap_or(i32::MAX)
}

/// GET /it10/questions
/// Answer keys are never sent to the client.
pub async fn list_questions() -> Json<ExamQuestionsResponse> {
    let questions = QUESTIONS
        .iter()
        .map(|q| ExamQuestionDto {
            id: q.id,
            text: q.text,
            choices: q.choices,
        })
        .collect();

    Json(ExamQuestionsResponse { questions })
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitExamRequest>,
) -> Result<Json<ExamResultDto>, ApiError> {
    let full_name = required_text(
        payload.full_name.as_deref(),
        "Full name",
        MAX_FULL_NAME_CHARS,
    )?;
    validate_answers(&payload.answers, QUESTIONS.len())?;

    let score = score_answers(&payload.answers);
    let total = i32::try_from(QUESTIONS.len()).unwrap_or(i32::MAX);

    let result = state
        .store()
        .record_exam_result(&full_name, score, total, Utc::now())
        .await?;

    tracing::info!(result_id = result.id, score, total, "Recorded exam result");
    Ok(Json(result.into()))
}
