use axum::{extract::State, Json};

use crate::auth::password::hash_password;
use crate::database::models::{AdminSummary, NewAdmin};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

const FAILURE: &str = "Failed to create admin user";
const ALREADY_EXISTS: &str = "Admin user already exists";

/// POST /api/admin/setup - create the well-known admin once
///
/// The pre-check is the idempotence guard. A concurrent call that loses the
/// race hits the unique email and gets the same 400.
pub async fn setup(State(state): State<AppState>) -> Result<Json<AdminSummary>, ApiError> {
    let admin = &state.config.admin;

    let existing = state
        .store
        .find_unique_admin(&admin.email)
        .await
        .map_err(ApiError::internal(FAILURE))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(ALREADY_EXISTS));
    }

    let password_hash = hash_password(&admin.password).map_err(ApiError::internal(FAILURE))?;

    let created = state
        .store
        .create_admin(NewAdmin {
            email: admin.email.clone(),
            username: admin.username.clone(),
            name: admin.name.clone(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::bad_request(ALREADY_EXISTS),
            other => ApiError::internal(FAILURE)(other),
        })?;

    tracing::info!("Bootstrapped admin user {}", created.email);
    Ok(Json(AdminSummary::from(&created)))
}
