use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::middleware::Session;

/// GET /api/auth/check - echo the caller's session
pub async fn check(Session(identity): Session) -> Response {
    match identity {
        Some(user) => {
            let user_type = user.user_type;
            Json(json!({
                "isAuthenticated": true,
                "user": user,
                "userType": user_type,
            }))
            .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "isAuthenticated": false })),
        )
            .into_response(),
    }
}
