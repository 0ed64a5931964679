//! Crawler Domain
//!
//! Read access to the `crawler_data` MongoDB database written by the crawler.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ SiteService  │  ← Site overview: counting, id translation, ordering
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← SiteRepository trait + MongoDB implementation
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ CrawlerStore │  ← Fixed collection accessors over one shared connection
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use database::mongodb::{MongoConfig, MongoConnectionManager};
//! use domain_crawler::{CrawlerStore, MongoSiteRepository, PageCountStrategy, SiteService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017");
//! let manager = Arc::new(MongoConnectionManager::from_config(config, false));
//!
//! let store = CrawlerStore::new(manager);
//! let service = SiteService::new(MongoSiteRepository::new(store), PageCountStrategy::Live);
//!
//! for site in service.get_all_sites().await? {
//!     println!("{}: {} pages", site.site_id, site.total_pages);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use crate::mongodb::MongoSiteRepository;
pub use error::{SiteError, SiteResult};
pub use models::{PageCountStrategy, SiteState, SiteSummary};
pub use repository::SiteRepository;
pub use service::SiteService;
pub use store::{CrawlerCollection, CrawlerStore, DATABASE_NAME, collection_names};
