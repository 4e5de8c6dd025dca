use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::UserType;
use crate::database::models::{NotificationFilter, NotificationUpdate};
use crate::error::ApiError;
use crate::middleware::{require_role, Session};
use crate::state::AppState;

use super::session_provider;

const FAILURE: &str = "Failed to mark notifications as read";

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub message: &'static str,
    pub count: u64,
}

/// PATCH /api/notifications/mark-all-read - one bulk update over the caller's unread rows
pub async fn mark_all_read(
    State(state): State<AppState>,
    Session(identity): Session,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let identity = require_role(identity.as_ref(), UserType::ServiceProvider)?;
    let provider = session_provider(&state, identity, FAILURE).await?;

    let filter = NotificationFilter {
        provider_id: Some(provider.id),
        is_read: Some(false),
    };
    let update = NotificationUpdate { is_read: Some(true) };

    let count = state
        .store
        .update_many_notifications(&filter, &update)
        .await
        .map_err(ApiError::internal(FAILURE))?;

    tracing::info!("Provider {} marked {} notifications as read", provider.id, count);

    Ok(Json(MarkAllReadResponse {
        message: "All notifications marked as read",
        count,
    }))
}
