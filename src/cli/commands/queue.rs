//! Ticket counter command handler

use crate::cli::QueueCommands;
use crate::config::Config;
use crate::db::Store;
use crate::services::{QueueService, SeaOrmQueueService};

pub async fn cmd_queue(config: &Config, command: &QueueCommands) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let queue = SeaOrmQueueService::new(store);

    let (label, ticket) = match command {
        QueueCommands::Current => ("Current", queue.current().await?),
        QueueCommands::Issue => ("Issued", queue.issue().await?),
        QueueCommands::Clear => ("Cleared", queue.clear().await?),
    };

    println!("{label}: {}", ticket.code);
    println!("  At: {}", ticket.at.to_rfc3339());

    Ok(())
}
