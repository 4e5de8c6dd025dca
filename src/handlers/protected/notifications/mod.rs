pub mod mark_all_read;
pub mod mark_read;

pub use mark_all_read::mark_all_read;
pub use mark_read::mark_read;

use crate::auth::Identity;
use crate::database::models::ServiceProvider;
use crate::error::ApiError;
use crate::state::AppState;

/// Load the provider row behind a provider session.
async fn session_provider(
    state: &AppState,
    identity: &Identity,
    failure: &'static str,
) -> Result<ServiceProvider, ApiError> {
    state
        .store
        .find_unique_provider(&identity.email)
        .await
        .map_err(ApiError::internal(failure))?
        .ok_or_else(|| ApiError::not_found("Provider not found"))
}
