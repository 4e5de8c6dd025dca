use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminSummary {
    fn from(a: &Admin) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            username: a.username.clone(),
            name: a.name.clone(),
            created_at: a.created_at,
        }
    }
}
