// handlers/public/auth/login.rs - session issue and teardown

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{password::verify_password, Identity, UserType};
use crate::error::ApiError;
use crate::state::AppState;

const FAILURE: &str = "Failed to sign in";
const INVALID: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
    pub user_type: UserType,
}

/// Stored credential for one identity table row
struct Credential {
    identity: Identity,
    password_hash: String,
}

async fn lookup(state: &AppState, email: &str, user_type: UserType) -> Result<Option<Credential>, ApiError> {
    let store = state.store.as_ref();

    let found = match user_type {
        UserType::Admin => store
            .find_unique_admin(email)
            .await
            .map_err(ApiError::internal(FAILURE))?
            .map(|a| (a.id, a.email, a.name, a.password_hash)),
        UserType::ServiceProvider => store
            .find_unique_provider(email)
            .await
            .map_err(ApiError::internal(FAILURE))?
            .map(|p| (p.id, p.email, p.name, p.password_hash)),
        UserType::Customer => store
            .find_unique_customer(email)
            .await
            .map_err(ApiError::internal(FAILURE))?
            .map(|c| (c.id, c.email, c.name, c.password_hash)),
    };

    Ok(found.map(|(id, email, name, password_hash)| Credential {
        identity: Identity {
            id,
            email,
            name,
            user_type,
        },
        password_hash,
    }))
}

/// POST /api/auth/login - verify credentials and set the session cookie
///
/// Unknown email and wrong password answer the same 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected login body: {}", rejection);
        ApiError::bad_request("Invalid login request")
    })?;

    let credential = lookup(&state, &request.email, request.user_type).await?;
    let Some(credential) = credential else {
        tracing::info!("Login failed for unknown {:?} {}", request.user_type, request.email);
        return Err(ApiError::unauthorized(INVALID));
    };

    if !verify_password(&request.password, &credential.password_hash) {
        tracing::info!("Login failed for {:?} {}", request.user_type, request.email);
        return Err(ApiError::unauthorized(INVALID));
    }

    let identity = credential.identity;
    let claims = state
        .keys
        .claims(identity.id, &identity.email, &identity.name, identity.user_type);
    let token = state
        .keys
        .generate_jwt(&claims)
        .map_err(ApiError::internal(FAILURE))?;

    let security = &state.config.security;
    let mut cookie = Cookie::new(security.session_cookie.clone(), token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(security.secure_cookie);
    cookie.set_same_site(SameSite::Lax);

    tracing::info!("Signed in {:?} {}", identity.user_type, identity.email);

    let user_type = identity.user_type;
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            user: identity,
            user_type,
        }),
    ))
}

/// POST /api/auth/logout - drop the session cookie
///
/// The expired cookie is sent whether or not the request carried one.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let mut cookie = Cookie::new(state.config.security.session_cookie.clone(), "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();

    (
        jar.add(cookie),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
