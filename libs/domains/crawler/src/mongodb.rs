//! MongoDB implementation of SiteRepository

use async_trait::async_trait;
use database::mongodb::{MongoConnect, MongoConnector};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;
use tracing::instrument;

use crate::error::SiteResult;
use crate::models::{ESTIMATE_PROJECTION_FIELDS, SiteState};
use crate::repository::SiteRepository;
use crate::store::CrawlerStore;

/// Site repository reading `site_states` and `url_states` through a [`CrawlerStore`]
pub struct MongoSiteRepository<C: MongoConnect = MongoConnector> {
    store: CrawlerStore<C>,
}

impl<C: MongoConnect> MongoSiteRepository<C> {
    pub fn new(store: CrawlerStore<C>) -> Self {
        Self { store }
    }

    /// Six estimate fields; `_id` stays so a malformed document can be reported by id
    fn estimate_projection() -> Document {
        let mut projection = Document::new();
        for field in ESTIMATE_PROJECTION_FIELDS {
            projection.insert(field, 1);
        }
        projection
    }

    async fn find_site_states(&self, options: Option<FindOptions>) -> SiteResult<Vec<SiteState>> {
        let collection = self.store.site_states().await?;
        let cursor = collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents.iter().map(SiteState::from_document).collect()
    }
}

#[async_trait]
impl<C: MongoConnect> SiteRepository for MongoSiteRepository<C> {
    #[instrument(skip(self))]
    async fn list_site_states(&self) -> SiteResult<Vec<SiteState>> {
        let states = self.find_site_states(None).await?;
        tracing::debug!(count = states.len(), "Loaded site states");
        Ok(states)
    }

    #[instrument(skip(self))]
    async fn list_site_state_estimates(&self) -> SiteResult<Vec<SiteState>> {
        let options = FindOptions::builder()
            .projection(Self::estimate_projection())
            .build();
        let states = self.find_site_states(Some(options)).await?;
        tracing::debug!(count = states.len(), "Loaded site state estimates");
        Ok(states)
    }

    #[instrument(skip(self))]
    async fn count_url_states(&self, site_id: &str) -> SiteResult<u64> {
        let collection = self.store.url_states().await?;
        let count = collection.count_documents(doc! { "site_id": site_id }).await?;
        Ok(count)
    }
}
