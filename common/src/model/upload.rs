//! Committed lease records and the per-day upload history derived from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A validated row after commit, as stored and served back by the history endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lease_date: NaiveDate,
    pub sqft: f64,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

/// Aggregate of one user's records uploaded on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadHistoryEntry {
    pub date: NaiveDate,
    /// Most recent upload timestamp of the day.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    pub count: usize,
}
