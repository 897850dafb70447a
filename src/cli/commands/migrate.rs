//! Migrate command handler

use tracing::info;

use crate::config::Config;
use crate::db::Store;

/// Opening the store applies any pending migrations.
pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    store.ping().await?;

    info!(database = %config.general.database_path, "Migrations applied");
    println!("✓ Database is up to date: {}", config.general.database_path);

    Ok(())
}
