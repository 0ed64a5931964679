//! Accessors for the fixed crawler collections

use std::sync::Arc;

use database::ConnectionManager;
use database::mongodb::{MongoConnect, MongoConnector};
use mongodb::bson::Document;
use mongodb::{Collection, Database};

/// Database holding everything the crawler writes
pub const DATABASE_NAME: &str = "crawler_data";

/// The collections of [`DATABASE_NAME`] this layer exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlerCollection {
    /// One document per tracked site, authoritative list of sites
    SiteStates,
    /// One document per crawled URL
    UrlStates,
    DailyStats,
    PerformanceHistory,
    AuditLog,
    PageChanges,
}

impl CrawlerCollection {
    pub const ALL: [CrawlerCollection; 6] = [
        CrawlerCollection::SiteStates,
        CrawlerCollection::UrlStates,
        CrawlerCollection::DailyStats,
        CrawlerCollection::PerformanceHistory,
        CrawlerCollection::AuditLog,
        CrawlerCollection::PageChanges,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CrawlerCollection::SiteStates => "site_states",
            CrawlerCollection::UrlStates => "url_states",
            CrawlerCollection::DailyStats => "daily_stats",
            CrawlerCollection::PerformanceHistory => "performance_history",
            CrawlerCollection::AuditLog => "audit_log",
            CrawlerCollection::PageChanges => "page_changes",
        }
    }
}

/// Names of every collection in [`CrawlerCollection::ALL`] order
pub fn collection_names() -> [&'static str; 6] {
    CrawlerCollection::ALL.map(|collection| collection.name())
}

/// Handles to the crawler database, backed by one shared connection
///
/// Every accessor awaits the shared connection (opening it on first use),
/// then hands out a fresh collection handle. Handles are cheap and are not
/// cached.
///
/// # Example
///
/// ```ignore
/// let manager = Arc::new(MongoConnectionManager::from_config(config, false));
/// let store = CrawlerStore::new(manager);
///
/// let site_states = store.site_states().await?;
/// ```
pub struct CrawlerStore<C: MongoConnect = MongoConnector> {
    connection: Arc<ConnectionManager<C>>,
}

impl<C: MongoConnect> CrawlerStore<C> {
    pub fn new(connection: Arc<ConnectionManager<C>>) -> Self {
        Self { connection }
    }

    /// The `crawler_data` database
    pub async fn database(&self) -> Result<Database, mongodb::error::Error> {
        let client = self.connection.client().await?;
        Ok(client.database(DATABASE_NAME))
    }

    pub async fn collection(
        &self,
        collection: CrawlerCollection,
    ) -> Result<Collection<Document>, mongodb::error::Error> {
        let db = self.database().await?;
        Ok(db.collection::<Document>(collection.name()))
    }

    pub async fn site_states(&self) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::SiteStates).await
    }

    pub async fn url_states(&self) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::UrlStates).await
    }

    pub async fn daily_stats(&self) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::DailyStats).await
    }

    pub async fn performance_history(
        &self,
    ) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::PerformanceHistory).await
    }

    pub async fn audit_log(&self) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::AuditLog).await
    }

    pub async fn page_changes(&self) -> Result<Collection<Document>, mongodb::error::Error> {
        self.collection(CrawlerCollection::PageChanges).await
    }
}

impl<C: MongoConnect> Clone for CrawlerStore<C> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Connect;
    use futures::future::{BoxFuture, FutureExt};
    use mongodb::Client;
    use mongodb::options::ClientOptions;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Builds a driver client without talking to a server, counting attempts
    struct OfflineConnector {
        attempts: Arc<AtomicU32>,
    }

    impl Connect for OfflineConnector {
        type Handle = Client;
        type Error = mongodb::error::Error;

        fn cache_key(&self) -> String {
            "offline".to_string()
        }

        fn connect(&self) -> BoxFuture<'static, Result<Client, mongodb::error::Error>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                let options = ClientOptions::parse("mongodb://127.0.0.1:27017").await?;
                Client::with_options(options)
            }
            .boxed()
        }
    }

    fn offline_store() -> (CrawlerStore<OfflineConnector>, Arc<AtomicU32>) {
        let attempts = Arc::new(AtomicU32::new(0));
        let connector = OfflineConnector {
            attempts: Arc::clone(&attempts),
        };
        let store = CrawlerStore::new(Arc::new(ConnectionManager::new(connector, false)));
        (store, attempts)
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(
            collection_names(),
            [
                "site_states",
                "url_states",
                "daily_stats",
                "performance_history",
                "audit_log",
                "page_changes"
            ]
        );
    }

    #[tokio::test]
    async fn test_database_is_crawler_data() {
        let (store, _) = offline_store();
        let db = store.database().await.unwrap();
        assert_eq!(db.name(), "crawler_data");
    }

    #[tokio::test]
    async fn test_concurrent_accessors_open_one_connection() {
        let (store, attempts) = offline_store();

        let (site_states, url_states) = tokio::join!(store.site_states(), store.url_states());

        assert_eq!(site_states.unwrap().name(), "site_states");
        assert_eq!(url_states.unwrap().name(), "url_states");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_accessors_bind_fixed_names_in_any_order() {
        let (store, attempts) = offline_store();

        let page_changes = store.page_changes().await.unwrap();
        let audit_log = store.audit_log().await.unwrap();
        let performance_history = store.performance_history().await.unwrap();
        let daily_stats = store.daily_stats().await.unwrap();
        let url_states = store.url_states().await.unwrap();
        let site_states = store.site_states().await.unwrap();

        let bound = [
            (page_changes, "page_changes"),
            (audit_log, "audit_log"),
            (performance_history, "performance_history"),
            (daily_stats, "daily_stats"),
            (url_states, "url_states"),
            (site_states, "site_states"),
        ];
        for (collection, expected) in bound {
            let namespace = collection.namespace();
            assert_eq!(namespace.db, "crawler_data");
            assert_eq!(namespace.coll, expected);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cloned_store_shares_connection() {
        let (store, attempts) = offline_store();
        let clone = store.clone();

        store.site_states().await.unwrap();
        clone.audit_log().await.unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
