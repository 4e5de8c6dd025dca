use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::auth::{Identity, SessionKeys, UserType};
use crate::error::ApiError;
use crate::state::AppState;

/// Session identity resolved from the request, `None` when unauthenticated.
#[derive(Clone, Debug)]
pub struct Session(pub Option<Identity>);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Session(resolve_identity(
            &parts.headers,
            &state.keys,
            &state.config.security.session_cookie,
        )))
    }
}

/// Bearer token first, then the session cookie. Bad or expired tokens
/// resolve to no identity.
pub fn resolve_identity(headers: &HeaderMap, keys: &SessionKeys, cookie_name: &str) -> Option<Identity> {
    let token = match extract_jwt_from_headers(headers) {
        Ok(token) => token,
        Err(msg) => {
            let jar = CookieJar::from_headers(headers);
            match jar.get(cookie_name) {
                Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
                _ => {
                    tracing::trace!("No session token: {}", msg);
                    return None;
                }
            }
        }
    };

    match keys.validate_jwt(&token) {
        Ok(claims) => Some(Identity::from(claims)),
        Err(e) => {
            tracing::debug!("Ignoring session token: {}", e);
            None
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}

/// Authorization guard. A missing session and a wrong role produce the
/// same 401 so callers cannot tell them apart.
pub fn require_role(identity: Option<&Identity>, expected: UserType) -> Result<&Identity, ApiError> {
    let Some(identity) = identity else {
        tracing::debug!("Rejected unauthenticated request for {:?} route", expected);
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    let allowed = match (identity.user_type, expected) {
        (UserType::Admin, UserType::Admin) => true,
        (UserType::ServiceProvider, UserType::ServiceProvider) => true,
        (UserType::Customer, UserType::Customer) => true,
        (UserType::Admin | UserType::ServiceProvider | UserType::Customer, _) => false,
    };

    if allowed {
        Ok(identity)
    } else {
        tracing::debug!(
            "Rejected {:?} session for {:?} route ({})",
            identity.user_type,
            expected,
            identity.email
        );
        Err(ApiError::unauthorized("Unauthorized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue, StatusCode};

    fn keys() -> SessionKeys {
        SessionKeys::from_secret("guard-secret", 1).unwrap()
    }

    fn identity(user_type: UserType) -> Identity {
        Identity {
            id: 1,
            email: "someone@example.com".into(),
            name: "Someone".into(),
            user_type,
        }
    }

    fn token(keys: &SessionKeys, user_type: UserType) -> String {
        keys.generate_jwt(&keys.claims(1, "someone@example.com", "Someone", user_type))
            .unwrap()
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        let err = require_role(None, UserType::Admin).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Unauthorized");
    }

    #[test]
    fn wrong_role_is_also_unauthorized() {
        for user_type in [UserType::Customer, UserType::ServiceProvider] {
            let who = identity(user_type);
            let err = require_role(Some(&who), UserType::Admin).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn matching_role_proceeds() {
        let who = identity(UserType::ServiceProvider);
        assert_eq!(require_role(Some(&who), UserType::ServiceProvider).unwrap(), &who);
    }

    #[test]
    fn resolves_bearer_token() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", token(&keys, UserType::Customer));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());

        let who = resolve_identity(&headers, &keys, "session").unwrap();
        assert_eq!(who.user_type, UserType::Customer);
    }

    #[test]
    fn resolves_session_cookie() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; session={}", token(&keys, UserType::Admin));
        headers.insert(header::COOKIE, HeaderValue::from_str(&value).unwrap());

        let who = resolve_identity(&headers, &keys, "session").unwrap();
        assert_eq!(who.user_type, UserType::Admin);
    }

    #[test]
    fn garbage_token_resolves_to_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"));
        assert!(resolve_identity(&headers, &keys(), "session").is_none());
    }
}
