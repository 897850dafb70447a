use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::exam_results;

pub struct ExamRepository {
    conn: DatabaseConnection,
}

impl ExamRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn record(
        &self,
        full_name: &str,
        score: i32,
        total_questions: i32,
        now: DateTime<Utc>,
    ) -> Result<exam_results::Model> {
        exam_results::ActiveModel {
            full_name: Set(full_name.to_string()),
            score: Set(score),
            total_questions: Set(total_questions),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert exam result")
    }
}
