use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub customer_id: i32,
    pub service_id: i32,
    pub booking_id: i32,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub customer_id: i32,
    pub service_id: i32,
    pub booking_id: i32,
    pub rating: i32,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub service_ids: Option<Vec<i32>>,
}
