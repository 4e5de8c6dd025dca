use axum::{extract::State, Json};

use crate::auth::UserType;
use crate::database::shape::{ProviderFields, ServiceRecord, ServiceShape};
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{require_role, Session};
use crate::state::AppState;
use crate::types::SortOrder;

const ADMIN_SERVICES: ServiceShape = ServiceShape {
    provider: Some(ProviderFields::Basic),
    reviews: None,
    order: SortOrder::Desc,
};

/// GET /api/admin/services
pub async fn list(
    State(state): State<AppState>,
    Session(identity): Session,
) -> Result<Json<Vec<ServiceRecord>>, ApiError> {
    require_role(identity.as_ref(), UserType::Admin)?;

    let services = Repository::new(state.store.as_ref())
        .services(&ADMIN_SERVICES)
        .await
        .map_err(ApiError::internal("Failed to fetch services"))?;

    Ok(Json(services))
}
