use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "ServiceHub API",
        "version": version,
        "endpoints": {
            "services": "/api/services (public)",
            "auth": "/api/auth/check, /api/auth/login, /api/auth/logout",
            "admin_setup": "/api/admin/setup (public, once)",
            "admin": "/api/admin/{bookings,providers,reviews,services} (admin session)",
            "notifications": "/api/notifications/:id, /api/notifications/mark-all-read (provider session)",
            "health": "/health"
        }
    }))
}

/// GET /health - datastore liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}
