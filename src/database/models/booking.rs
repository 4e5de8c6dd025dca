use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle is driven outside this service; rows are read as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub service_id: i32,
    pub status: BookingStatus,
    pub scheduled_date: DateTime<Utc>,
    /// Completion evidence uploaded by the provider
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub service_id: i32,
    pub status: BookingStatus,
    pub scheduled_date: DateTime<Utc>,
    pub image_url: Option<String>,
}
