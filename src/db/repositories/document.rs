use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::lock_for_write;
use crate::entities::approval_documents::{self, DocumentStatus};
use crate::entities::prelude::*;

/// Result of a bulk decision; nothing is written unless it is `Applied`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    Applied(u64),
    Missing(Vec<i32>),
    NotPending(Vec<i32>),
}

pub struct DocumentRepository {
    conn: DatabaseConnection,
}

impl DocumentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<approval_documents::Model>> {
        ApprovalDocuments::find()
            .order_by_asc(approval_documents::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list documents")
    }

    /// Moves every listed pending document to `status`, all or nothing.
    pub async fn decide(
        &self,
        ids: &[i32],
        status: DocumentStatus,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<DecisionOutcome> {
        let txn = self.conn.begin().await?;

        lock_for_write::<ApprovalDocuments, _>(&txn, approval_documents::Column::Status)
            .await
            .context("Failed to lock documents")?;

        let docs = ApprovalDocuments::find()
            .filter(approval_documents::Column::Id.is_in(ids.iter().copied()))
            .all(&txn)
            .await
            .context("Failed to load documents for decision")?;

        let missing: Vec<i32> = ids
            .iter()
            .copied()
            .filter(|id| !docs.iter().any(|d| d.id == *id))
            .collect();
        if !missing.is_empty() {
            return Ok(DecisionOutcome::Missing(missing));
        }

        let not_pending: Vec<i32> = docs
            .iter()
            .filter(|d| d.status != DocumentStatus::Pending)
            .map(|d| d.id)
            .collect();
        if !not_pending.is_empty() {
            return Ok(DecisionOutcome::NotPending(not_pending));
        }

        let result = ApprovalDocuments::update_many()
            .col_expr(approval_documents::Column::Status, Expr::value(status.into_value()))
            .col_expr(approval_documents::Column::Reason, Expr::value(reason))
            .col_expr(approval_documents::Column::UpdatedAt, Expr::value(now))
            .filter(approval_documents::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await
            .context("Failed to update document statuses")?;

        txn.commit().await?;

        Ok(DecisionOutcome::Applied(result.rows_affected))
    }

    /// Restores every document to its seeded status with an empty reason.
    pub async fn reset(&self, now: DateTime<Utc>) -> Result<usize> {
        let txn = self.conn.begin().await?;

        lock_for_write::<ApprovalDocuments, _>(&txn, approval_documents::Column::Status)
            .await
            .context("Failed to lock documents")?;

        let docs = ApprovalDocuments::find()
            .all(&txn)
            .await
            .context("Failed to load documents for reset")?;

        for doc in &docs {
            ApprovalDocuments::update(approval_documents::ActiveModel {
                id: Unchanged(doc.id),
                status: Set(DocumentStatus::seeded(doc.id)),
                reason: Set(String::new()),
                updated_at: Set(now),
                ..Default::default()
            })
            .exec(&txn)
            .await
            .with_context(|| format!("Failed to reset document {}", doc.id))?;
        }

        txn.commit().await?;
        Ok(docs.len())
    }
}
