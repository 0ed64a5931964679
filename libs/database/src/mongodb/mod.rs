//! MongoDB connector and utilities
//!
//! Provides configuration, the shared connection manager and a health check.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoConnect, MongoConnectionManager, MongoConnector, connect_from_config};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database, bson, error};
