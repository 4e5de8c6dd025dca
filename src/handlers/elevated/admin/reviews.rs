use axum::{extract::State, Json};

use crate::auth::UserType;
use crate::database::shape::{ProviderFields, ReviewRecord, ReviewShape, ServiceShape};
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{require_role, Session};
use crate::state::AppState;
use crate::types::SortOrder;

const ADMIN_REVIEWS: ReviewShape = ReviewShape {
    service: Some(ServiceShape {
        provider: Some(ProviderFields::Basic),
        reviews: None,
        order: SortOrder::Asc,
    }),
    customer: true,
    booking: true,
    order: SortOrder::Desc,
};

/// GET /api/admin/reviews
pub async fn list(
    State(state): State<AppState>,
    Session(identity): Session,
) -> Result<Json<Vec<ReviewRecord>>, ApiError> {
    require_role(identity.as_ref(), UserType::Admin)?;

    let reviews = Repository::new(state.store.as_ref())
        .reviews(&ADMIN_REVIEWS)
        .await
        .map_err(ApiError::internal("Failed to fetch reviews"))?;

    Ok(Json(reviews))
}
