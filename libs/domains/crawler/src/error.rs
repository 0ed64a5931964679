use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    /// Driver error, carried as-is (connection or query failure)
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Malformed site state {0}: missing string field 'site_id'")]
    MalformedSiteState(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
