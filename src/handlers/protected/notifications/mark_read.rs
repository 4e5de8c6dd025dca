use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::UserType;
use crate::database::models::{Notification, NotificationUpdate};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::middleware::{require_role, Session};
use crate::state::AppState;

use super::session_provider;

const FAILURE: &str = "Failed to update notification";

/// PATCH /api/notifications/:id - mark one of the caller's notifications as read
pub async fn mark_read(
    State(state): State<AppState>,
    Session(identity): Session,
    id: Option<Path<String>>,
) -> Result<Json<Notification>, ApiError> {
    let identity = require_role(identity.as_ref(), UserType::ServiceProvider)?;
    let id = parse_id(id.as_ref().map(|Path(raw)| raw.as_str()))?;

    let provider = session_provider(&state, identity, FAILURE).await?;

    let notification = state
        .store
        .find_unique_notification(id)
        .await
        .map_err(ApiError::internal(FAILURE))?;

    match notification {
        Some(n) if n.provider_id == provider.id => {}
        Some(n) => {
            tracing::warn!(
                "Provider {} tried to mark notification {} owned by provider {}",
                provider.id,
                n.id,
                n.provider_id
            );
            return Err(ApiError::not_found("Notification not found"));
        }
        None => return Err(ApiError::not_found("Notification not found")),
    }

    let update = NotificationUpdate { is_read: Some(true) };
    let updated = state
        .store
        .update_notification(id, &update)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => ApiError::not_found("Notification not found"),
            other => ApiError::internal(FAILURE)(other),
        })?;

    Ok(Json(updated))
}
