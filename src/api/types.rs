use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::db::ProductCode;
use crate::entities::approval_documents::DocumentStatus;
use crate::entities::{approval_documents, comments, exam_results, people, questions};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// Auth

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i32,
    pub username: String,
    pub token: String,
    pub expires_at_utc: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub id: i32,
    pub username: String,
    pub created_at_utc: DateTime<Utc>,
    pub last_login_at_utc: Option<DateTime<Utc>>,
}

// Queue

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicketResponse {
    pub queue_number: String,
    pub issued_at_utc: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTicketResponse {
    pub queue_number: String,
    pub updated_at_utc: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedTicketResponse {
    pub queue_number: String,
    pub cleared_at_utc: DateTime<Utc>,
}

// People

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub remark: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}

impl From<people::Model> for PersonDto {
    fn from(model: people::Model) -> Self {
        Self {
            id: model.id,
            full_name: format!("{} {}", model.first_name, model.last_name),
            first_name: model.first_name,
            last_name: model.last_name,
            birth_date: model.birth_date,
            age: model.age,
            remark: model.remark,
            created_at_utc: model.created_at,
        }
    }
}

// Documents

#[derive(Debug, Serialize)]
pub struct DocumentDto {
    pub id: i32,
    pub title: String,
    pub reason: String,
    pub status: DocumentStatus,
}

impl From<approval_documents::Model> for DocumentDto {
    fn from(model: approval_documents::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            reason: model.reason,
            status: model.status,
        }
    }
}

// Profiles

#[derive(Debug, Serialize)]
pub struct ProfileSavedResponse {
    pub id: i32,
    pub message: String,
}

// Product codes

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCodeDto {
    pub id: i32,
    pub product_code: String,
    pub created_at_utc: DateTime<Utc>,
}

impl From<ProductCode> for ProductCodeDto {
    fn from(code: ProductCode) -> Self {
        Self {
            id: code.id,
            product_code: code.product_code,
            created_at_utc: code.created_at,
        }
    }
}

// Question bank

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: i32,
    pub display_order: i32,
    pub question_text: String,
    pub choices: [String; 4],
}

impl From<questions::Model> for QuestionDto {
    fn from(model: questions::Model) -> Self {
        Self {
            id: model.id,
            display_order: model.display_order,
            question_text: model.question_text,
            choices: [model.choice1, model.choice2, model.choice3, model.choice4],
        }
    }
}

// Comment thread

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub commenter: String,
    pub message: String,
    pub created_at_utc: DateTime<Utc>,
}

impl From<comments::Model> for CommentDto {
    fn from(model: comments::Model) -> Self {
        Self {
            id: model.id,
            commenter: model.commenter,
            message: model.message,
            created_at_utc: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub author: &'static str,
    pub created_at_utc: DateTime<Utc>,
    pub image_url: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub post: PostDto,
    pub comments: Vec<CommentDto>,
}

// Exam

#[derive(Debug, Serialize)]
pub struct ExamQuestionDto {
    pub id: i32,
    pub text: &'static str,
    pub choices: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct ExamQuestionsResponse {
    pub questions: Vec<ExamQuestionDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResultDto {
    pub id: i32,
    pub full_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub created_at_utc: DateTime<Utc>,
}

impl From<exam_results::Model> for ExamResultDto {
    fn from(model: exam_results::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            score: model.score,
            total_questions: model.total_questions,
            created_at_utc: model.created_at,
        }
    }
}
