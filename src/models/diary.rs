use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One generated diary per device per date. `moods` is the JSONB entry
/// sequence the summary was generated from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryRecord {
    pub device_id: String,
    pub diary_date: NaiveDate,
    pub summary: String,
    pub moods: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDiaryRequest {
    pub device_id: Option<String>,
    /// Calendar date as YYYY-MM-DD.
    pub date: Option<String>,
}
