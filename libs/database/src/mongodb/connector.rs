use futures::future::{BoxFuture, FutureExt};
use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{Connect, ConnectionManager};

/// Shared MongoDB connection, see [`ConnectionManager`]
pub type MongoConnectionManager = ConnectionManager<MongoConnector>;

/// Any connector that yields a driver `Client`
///
/// Code that only needs collections should be generic over this rather than
/// [`MongoConnector`], so tests can hand it a client that never dials out.
pub trait MongoConnect: Connect<Handle = Client, Error = mongodb::error::Error> {}

impl<C> MongoConnect for C where C: Connect<Handle = Client, Error = mongodb::error::Error> {}

/// Connect using a MongoConfig
///
/// The client is only returned once the server has answered a `ping`, so a
/// malformed connection string or an unreachable server fails here. Errors
/// are the driver's own and are not retried.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, mongodb::error::Error> {
    info!(url = %config.redacted_url(), "Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`Connect`] implementation backed by the MongoDB driver
#[derive(Clone, Debug)]
pub struct MongoConnector {
    config: MongoConfig,
}

impl MongoConnector {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }
}

impl Connect for MongoConnector {
    type Handle = Client;
    type Error = mongodb::error::Error;

    fn cache_key(&self) -> String {
        self.config.url.clone()
    }

    fn connect(&self) -> BoxFuture<'static, Result<Client, mongodb::error::Error>> {
        let config = self.config.clone();
        async move { connect_from_config(&config).await }.boxed()
    }
}

impl ConnectionManager<MongoConnector> {
    /// Build a manager for `config`
    ///
    /// Pass `reuse_across_reloads = true` in development so rebuilt managers
    /// share the already-open client.
    pub fn from_config(config: MongoConfig, reuse_across_reloads: bool) -> Self {
        ConnectionManager::new(MongoConnector::new(config), reuse_across_reloads)
    }
}
