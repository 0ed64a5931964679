//! Database library providing lazily-shared connections
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB config, connector, connection manager and health check
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, MongoConnectionManager};
//!
//! let config = MongoConfig::from_env()?;
//! let manager = MongoConnectionManager::from_config(config, false);
//!
//! // The first call connects, later calls reuse the same client
//! let client = manager.client().await?;
//! let db = client.database("crawler_data");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{Connect, ConnectionManager};
