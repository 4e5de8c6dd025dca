use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ServiceProvider {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub service_type: String,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewServiceProvider {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub service_type: String,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Provider fields without the credential hash; coordinates only when the
/// query shape asks for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub service_type: String,
    pub phone: String,
    pub address: String,
    #[serde(flatten)]
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

impl ProviderSummary {
    pub fn project(p: &ServiceProvider, with_location: bool) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            username: p.username.clone(),
            email: p.email.clone(),
            service_type: p.service_type.clone(),
            phone: p.phone.clone(),
            address: p.address.clone(),
            location: with_location.then_some(GeoPoint {
                latitude: p.latitude,
                longitude: p.longitude,
            }),
            created_at: p.created_at,
        }
    }
}
