use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Customer row. The credential hash stays inside the store layer.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Projection safe to hand to any caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            username: c.username.clone(),
            email: c.email.clone(),
        }
    }
}
