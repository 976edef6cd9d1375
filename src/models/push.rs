use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One push registration per device, last write wins. An empty token means
/// notifications are disabled for the device.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PushRegistration {
    pub device_id: String,
    pub token: String,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterTokenRequest {
    pub device_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendNotificationsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}
