use axum::{extract::State, Json};

use crate::auth::UserType;
use crate::database::models::ProviderSummary;
use crate::database::shape::ProviderFields;
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{require_role, Session};
use crate::state::AppState;
use crate::types::SortOrder;

/// GET /api/admin/providers - providers projected without credential hashes
pub async fn list(
    State(state): State<AppState>,
    Session(identity): Session,
) -> Result<Json<Vec<ProviderSummary>>, ApiError> {
    require_role(identity.as_ref(), UserType::Admin)?;

    let providers = Repository::new(state.store.as_ref())
        .providers(ProviderFields::Basic, SortOrder::Desc)
        .await
        .map_err(ApiError::internal("Failed to fetch providers"))?;

    Ok(Json(providers))
}
