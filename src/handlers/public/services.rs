use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::database::shape::{ProviderFields, ReviewsInclude, ServiceRecord, ServiceShape};
use crate::database::Repository;
use crate::state::AppState;
use crate::types::SortOrder;

const PUBLIC_SERVICES: ServiceShape = ServiceShape {
    provider: Some(ProviderFields::WithLocation),
    reviews: Some(ReviewsInclude {
        customer: true,
        order: SortOrder::Desc,
    }),
    order: SortOrder::Desc,
};

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: Vec<ServiceRecord>,
}

/// GET /api/services - public catalogue with provider location and reviews
///
/// Failures answer `{"message": ...}` rather than `{"error": ...}`; existing
/// clients read that key.
pub async fn list(State(state): State<AppState>) -> Result<Json<ServicesResponse>, Response> {
    let services = Repository::new(state.store.as_ref())
        .services(&PUBLIC_SERVICES)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching services: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error fetching services" })),
            )
                .into_response()
        })?;

    Ok(Json(ServicesResponse { services }))
}
