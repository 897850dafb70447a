//! Domain service for the shared ticket counter.
//!
//! Tickets run `A0, A1, ..., A9, B0, ..., Z9` and then wrap back to `A0`.
//! `00` means nothing has been issued since the last clear.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::queue_state::MAX_INDEX;

/// Rendering of the cursor before the first issue.
pub const EMPTY_TICKET: &str = "00";

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for QueueError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for QueueError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A rendered ticket and when the cursor last moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub code: String,
    pub at: DateTime<Utc>,
}

/// Renders a cursor index as a two-character ticket code.
#[must_use]
pub fn format_ticket(index: i32) -> String {
    let Ok(i) = u32::try_from(index) else {
        return EMPTY_TICKET.to_string();
    };
    if index > MAX_INDEX {
        return EMPTY_TICKET.to_string();
    }

    match char::from_u32(u32::from('A') + i / 10) {
        Some(letter) => format!("{letter}{}", i % 10),
        None => EMPTY_TICKET.to_string(),
    }
}

#[async_trait::async_trait]
pub trait QueueService: Send + Sync {
    /// Issues the next ticket; concurrent callers never receive the same code.
    async fn issue(&self) -> Result<Ticket, QueueError>;

    /// Last issued ticket, or `00`.
    async fn current(&self) -> Result<Ticket, QueueError>;

    /// Resets the counter so the next issue is `A0`.
    async fn clear(&self) -> Result<Ticket, QueueError>;
}
