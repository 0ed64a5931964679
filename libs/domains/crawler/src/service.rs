//! Site Service - aggregation rules for the site overview

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::instrument;

use crate::error::SiteResult;
use crate::models::{PageCountStrategy, SiteSummary, sort_by_total_pages};
use crate::repository::SiteRepository;

/// Builds [`SiteSummary`] lists from the site collections
pub struct SiteService<R: SiteRepository> {
    repository: Arc<R>,
    strategy: PageCountStrategy,
}

impl<R: SiteRepository> SiteService<R> {
    pub fn new(repository: R, strategy: PageCountStrategy) -> Self {
        Self {
            repository: Arc::new(repository),
            strategy,
        }
    }

    pub fn strategy(&self) -> PageCountStrategy {
        self.strategy
    }

    /// Every known site, largest page count first
    ///
    /// There is no pagination. Repository errors are returned as they are,
    /// nothing is retried.
    #[instrument(skip(self), fields(strategy = %self.strategy))]
    pub async fn get_all_sites(&self) -> SiteResult<Vec<SiteSummary>> {
        let mut sites = match self.strategy {
            PageCountStrategy::Live => self.sites_with_live_counts().await?,
            PageCountStrategy::Estimate => self.sites_with_estimates().await?,
        };

        sort_by_total_pages(&mut sites);

        tracing::debug!(count = sites.len(), "Built site summaries");
        Ok(sites)
    }

    async fn sites_with_live_counts(&self) -> SiteResult<Vec<SiteSummary>> {
        let states = self.repository.list_site_states().await?;

        // Counts are independent per site
        let counts = try_join_all(
            states
                .iter()
                .map(|state| self.repository.count_url_states(&state.site_id)),
        )
        .await?;

        Ok(states
            .into_iter()
            .zip(counts)
            .map(|(state, total_pages)| SiteSummary::with_live_count(state, total_pages))
            .collect())
    }

    async fn sites_with_estimates(&self) -> SiteResult<Vec<SiteSummary>> {
        let states = self.repository.list_site_state_estimates().await?;
        Ok(states.into_iter().map(SiteSummary::with_estimate).collect())
    }
}

impl<R: SiteRepository> Clone for SiteService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            strategy: self.strategy,
        }
    }
}
