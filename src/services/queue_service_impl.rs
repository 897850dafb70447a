//! `SeaORM` implementation of the `QueueService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::db::Store;
use crate::services::queue_service::{QueueError, QueueService, Ticket, format_ticket};

pub struct SeaOrmQueueService {
    store: Store,
}

impl SeaOrmQueueService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QueueService for SeaOrmQueueService {
    async fn issue(&self) -> Result<Ticket, QueueError> {
        let now = Utc::now();
        let cursor = self.store.advance_ticket(now).await?;
        let code = format_ticket(cursor.last_issued_index);

        metrics::counter!("queue_tickets_issued_total").increment(1);
        debug!(index = cursor.last_issued_index, "Issued ticket {code}");

        Ok(Ticket { code, at: now })
    }

    async fn current(&self) -> Result<Ticket, QueueError> {
        let cursor = self.store.current_ticket().await?;

        Ok(Ticket {
            code: format_ticket(cursor.last_issued_index),
            at: cursor.updated_at,
        })
    }

    async fn clear(&self) -> Result<Ticket, QueueError> {
        let cursor = self.store.reset_tickets(Utc::now()).await?;
        info!("Ticket counter cleared");

        Ok(Ticket {
            code: format_ticket(cursor.last_issued_index),
            at: cursor.updated_at,
        })
    }
}
