use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i32,
    pub provider_id: i32,
    pub booking_id: Option<i32>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub provider_id: i32,
    pub booking_id: Option<i32>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub provider_id: Option<i32>,
    pub is_read: Option<bool>,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification) -> bool {
        self.provider_id.map_or(true, |id| n.provider_id == id)
            && self.is_read.map_or(true, |flag| n.is_read == flag)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationUpdate {
    pub is_read: Option<bool>,
}
