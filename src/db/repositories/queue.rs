use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::entities::prelude::*;
use crate::entities::queue_state::{self, CURSOR_ID, MAX_INDEX, NONE_ISSUED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketCursor {
    pub last_issued_index: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<queue_state::Model> for TicketCursor {
    fn from(model: queue_state::Model) -> Self {
        Self {
            last_issued_index: model.last_issued_index,
            updated_at: model.updated_at,
        }
    }
}

pub struct QueueRepository {
    conn: DatabaseConnection,
}

impl QueueRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Creates the cursor row with no ticket issued unless it already exists.
    pub async fn ensure_cursor(&self, now: DateTime<Utc>) -> Result<()> {
        let cursor = queue_state::ActiveModel {
            id: Set(CURSOR_ID),
            last_issued_index: Set(NONE_ISSUED),
            updated_at: Set(now),
        };

        QueueState::insert(cursor)
            .on_conflict(
                OnConflict::column(queue_state::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to initialize queue cursor")?;

        Ok(())
    }

    pub async fn current(&self) -> Result<TicketCursor> {
        let cursor = QueueState::find_by_id(CURSOR_ID)
            .one(&self.conn)
            .await
            .context("Failed to read queue cursor")?
            .ok_or_else(|| anyhow::anyhow!("Queue cursor row is missing"))?;

        Ok(cursor.into())
    }

    /// Advances the cursor by one, wrapping after `MAX_INDEX`, and returns the new value.
    ///
    /// The `UPDATE` must stay the first statement of the transaction: it takes the
    /// SQLite write lock before the read-back, which serializes concurrent callers.
    pub async fn advance(&self, now: DateTime<Utc>) -> Result<TicketCursor> {
        let txn = self.conn.begin().await?;

        let next = Expr::case(
            Expr::col(queue_state::Column::LastIssuedIndex).gte(MAX_INDEX),
            Expr::val(0),
        )
        .finally(Expr::col(queue_state::Column::LastIssuedIndex).add(1));

        let result = QueueState::update_many()
            .col_expr(queue_state::Column::LastIssuedIndex, next.into())
            .col_expr(queue_state::Column::UpdatedAt, Expr::value(now))
            .filter(queue_state::Column::Id.eq(CURSOR_ID))
            .exec(&txn)
            .await
            .context("Failed to advance queue cursor")?;

        if result.rows_affected == 0 {
            anyhow::bail!("Queue cursor row is missing");
        }

        let cursor = QueueState::find_by_id(CURSOR_ID)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Queue cursor row is missing"))?;

        txn.commit().await?;
        Ok(cursor.into())
    }

    pub async fn reset(&self, now: DateTime<Utc>) -> Result<TicketCursor> {
        let result = QueueState::update_many()
            .col_expr(queue_state::Column::LastIssuedIndex, Expr::value(NONE_ISSUED))
            .col_expr(queue_state::Column::UpdatedAt, Expr::value(now))
            .filter(queue_state::Column::Id.eq(CURSOR_ID))
            .exec(&self.conn)
            .await
            .context("Failed to reset queue cursor")?;

        if result.rows_affected == 0 {
            anyhow::bail!("Queue cursor row is missing");
        }

        Ok(TicketCursor {
            last_issued_index: NONE_ISSUED,
            updated_at: now,
        })
    }
}
