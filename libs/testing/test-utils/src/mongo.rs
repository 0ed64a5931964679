//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a MongoDB container for testing.

use mongodb::Client;
use mongodb::bson::Document;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
/// use mongodb::bson::doc;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// mongo
///     .insert_many("crawler_data", "site_states", vec![doc! { "site_id": "example_com" }])
///     .await;
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    ///
    /// Uses the MongoDB 7 image.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Client for seeding and inspecting data directly
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Insert raw documents into `database.collection`
    pub async fn insert_many(&self, database: &str, collection: &str, documents: Vec<Document>) {
        if documents.is_empty() {
            return;
        }
        self.client
            .database(database)
            .collection::<Document>(collection)
            .insert_many(documents)
            .await
            .expect("Failed to seed test documents");
    }
}
