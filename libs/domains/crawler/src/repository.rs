use async_trait::async_trait;

use crate::error::SiteResult;
use crate::models::SiteState;

/// Read access to the site collections
///
/// `site_states` decides which sites exist; `url_states` is only ever counted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Every site state document
    async fn list_site_states(&self) -> SiteResult<Vec<SiteState>>;

    /// Every site state document, limited to the fields the estimate view needs
    async fn list_site_state_estimates(&self) -> SiteResult<Vec<SiteState>>;

    /// Number of URL states whose `site_id` equals `site_id` exactly
    async fn count_url_states(&self, site_id: &str) -> SiteResult<u64>;
}
