use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::lock_for_write;
use crate::entities::{prelude::*, questions};

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub choices: [String; 4],
}

pub struct QuestionRepository {
    conn: DatabaseConnection,
}

impl QuestionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<questions::Model>> {
        Questions::find()
            .order_by_asc(questions::Column::DisplayOrder)
            .all(&self.conn)
            .await
            .context("Failed to list questions")
    }

    /// Appends after the current last question.
    pub async fn create(
        &self,
        question: NewQuestion,
        now: DateTime<Utc>,
    ) -> Result<questions::Model> {
        let txn = self.conn.begin().await?;

        lock_for_write::<Questions, _>(&txn, questions::Column::DisplayOrder)
            .await
            .context("Failed to lock questions")?;

        let max_order: Option<i32> = Questions::find()
            .select_only()
            .column_as(questions::Column::DisplayOrder.max(), "max_order")
            .into_tuple::<Option<i32>>()
            .one(&txn)
            .await
            .context("Failed to read max display order")?
            .flatten();

        let [choice1, choice2, choice3, choice4] = question.choices;
        let model = questions::ActiveModel {
            display_order: Set(max_order.unwrap_or(0) + 1),
            question_text: Set(question.question_text),
            choice1: Set(choice1),
            choice2: Set(choice2),
            choice3: Set(choice3),
            choice4: Set(choice4),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert question")?;

        txn.commit().await?;
        Ok(model)
    }

    /// Deletes a question and renumbers the rest `1..n`. Returns whether it existed.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let result = Questions::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete question")?;
        if result.rows_affected == 0 {
            return Ok(false);
        }

        let remaining = Questions::find()
            .order_by_asc(questions::Column::DisplayOrder)
            .all(&txn)
            .await?;

        // Ascending order keeps every target slot free under the unique index.
        for (position, question) in (1..).zip(remaining) {
            if question.display_order != position {
                Questions::update(questions::ActiveModel {
                    id: Unchanged(question.id),
                    display_order: Set(position),
                    ..Default::default()
                })
                .exec(&txn)
                .await
                .context("Failed to renumber questions")?;
            }
        }

        txn.commit().await?;
        Ok(true)
    }
}
