use anyhow::Context;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::security::TokenService;
use crate::services::{AuthService, QueueService, SeaOrmAuthService, SeaOrmQueueService};

/// Services shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub queue_service: Arc<dyn QueueService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires the services on top of an already opened store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let tokens =
            TokenService::new(&config.security.jwt).context("Invalid JWT configuration")?;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens,
            config.security.lockout.clone(),
        )) as Arc<dyn AuthService>;

        let queue_service = Arc::new(SeaOrmQueueService::new(store.clone())) as Arc<dyn QueueService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            queue_service,
        })
    }
}
