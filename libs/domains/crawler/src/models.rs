use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{SiteError, SiteResult};

/// Fields read from `site_states` when page counts come from the stored estimate
pub const ESTIMATE_PROJECTION_FIELDS: [&str; 6] = [
    "site_id",
    "current_cycle",
    "is_first_cycle",
    "cycle_start_time",
    "updated_at",
    "total_pages_estimate",
];

/// How `total_pages` of a [`SiteSummary`] is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PageCountStrategy {
    /// Count `url_states` per site and show ids in dashboard form (`_` → `-`)
    #[default]
    Live,
    /// Read `total_pages_estimate` from the site state, ids unchanged
    Estimate,
}

/// A `site_states` document as this layer reads it
#[derive(Debug, Clone, PartialEq)]
pub struct SiteState {
    pub site_id: String,
    pub current_cycle: Option<i64>,
    pub is_first_cycle: Option<bool>,
    pub cycle_start_time: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub total_pages_estimate: Option<u64>,
}

impl SiteState {
    /// Read a site state from a raw document
    ///
    /// Only `site_id` is required. Numbers may be stored as int32, int64 or
    /// double; timestamps as BSON datetimes or RFC 3339 strings. Values of
    /// any other type are treated as absent.
    pub fn from_document(doc: &Document) -> SiteResult<Self> {
        let site_id = doc.get_str("site_id").map_err(|_| {
            let id = doc
                .get("_id")
                .map(|id| id.to_string())
                .unwrap_or_else(|| "<no _id>".to_string());
            SiteError::MalformedSiteState(id)
        })?;

        Ok(Self {
            site_id: site_id.to_string(),
            current_cycle: doc.get("current_cycle").and_then(bson_to_i64),
            is_first_cycle: doc.get("is_first_cycle").and_then(Bson::as_bool),
            cycle_start_time: timestamp_field(doc, "cycle_start_time"),
            updated_at: timestamp_field(doc, "updated_at"),
            total_pages_estimate: doc
                .get("total_pages_estimate")
                .and_then(bson_to_i64)
                .and_then(|n| u64::try_from(n).ok()),
        })
    }

    /// Site id in the form the dashboard uses: every `_` becomes `-`
    pub fn display_site_id(&self) -> String {
        self.site_id.replace('_', "-")
    }

    /// Stored cycle, or 1 when missing or zero; other values pass through as stored
    pub fn current_cycle_or_default(&self) -> i64 {
        match self.current_cycle {
            Some(cycle) if cycle != 0 => cycle,
            _ => 1,
        }
    }

    /// True unless the document explicitly says `false`
    pub fn is_first_cycle_or_default(&self) -> bool {
        self.is_first_cycle != Some(false)
    }
}

/// One row of the site overview, built fresh on every read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub site_id: String,
    pub total_pages: u64,
    pub current_cycle: i64,
    pub is_first_cycle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SiteSummary {
    /// Summary with a live `url_states` count and the dashboard id form
    pub fn with_live_count(state: SiteState, total_pages: u64) -> Self {
        let site_id = state.display_site_id();
        Self::build(state, site_id, total_pages)
    }

    /// Summary using the stored page estimate (0 when absent) and the stored id
    pub fn with_estimate(state: SiteState) -> Self {
        let total_pages = state.total_pages_estimate.unwrap_or(0);
        let site_id = state.site_id.clone();
        Self::build(state, site_id, total_pages)
    }

    fn build(state: SiteState, site_id: String, total_pages: u64) -> Self {
        Self {
            site_id,
            total_pages,
            current_cycle: state.current_cycle_or_default(),
            is_first_cycle: state.is_first_cycle_or_default(),
            cycle_start_time: state.cycle_start_time,
            last_updated: state.updated_at,
        }
    }
}

/// Order summaries by page count, largest first; equal counts keep their order
pub fn sort_by_total_pages(sites: &mut [SiteSummary]) {
    sites.sort_by(|a, b| b.total_pages.cmp(&a.total_pages));
}

fn bson_to_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        Bson::Double(n) if n.is_finite() => Some(*n as i64),
        _ => None,
    }
}

fn timestamp_field(doc: &Document, key: &str) -> Option<DateTime<Utc>> {
    let value = doc.get(key)?;
    let parsed = match value {
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        Bson::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    };
    if parsed.is_none() && !matches!(value, Bson::Null) {
        tracing::debug!(field = key, ?value, "Ignoring unreadable timestamp");
    }
    parsed
}
