use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::comments::{self, DEFAULT_COMMENTER};
use crate::entities::prelude::*;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Oldest first
    pub async fn list(&self) -> Result<Vec<comments::Model>> {
        Comments::find()
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments")
    }

    pub async fn add(&self, message: &str, now: DateTime<Utc>) -> Result<comments::Model> {
        comments::ActiveModel {
            commenter: Set(DEFAULT_COMMENTER.to_string()),
            message: Set(message.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert comment")
    }
}
