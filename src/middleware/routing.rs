use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::UserType;
use crate::config::RoutingConfig;
use crate::state::AppState;
use super::auth::resolve_identity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    Redirect(String),
}

/// Matches `prefix` exactly or as a leading path segment. Only used for
/// the pass-through paths.
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Page prefixes match as plain string prefixes, so `/login-help`,
/// `/register/provider` and `/bookings` are all covered.
fn has_prefix(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

/// Path-and-role decision table for page requests. No data access.
pub fn decide(path: &str, user_type: Option<UserType>, routing: &RoutingConfig) -> RouteDecision {
    if under(path, "/api") || path == "/health" {
        return RouteDecision::Proceed;
    }

    if has_prefix(path, &routing.auth_pages) {
        return match user_type {
            Some(UserType::ServiceProvider) => RouteDecision::Redirect(routing.provider_home.clone()),
            Some(UserType::Admin | UserType::Customer) => RouteDecision::Redirect(routing.customer_home.clone()),
            None => RouteDecision::Proceed,
        };
    }

    if path.starts_with(routing.provider_prefix.as_str()) {
        return match user_type {
            None => RouteDecision::Redirect(routing.login_page.clone()),
            Some(UserType::ServiceProvider) => RouteDecision::Proceed,
            Some(UserType::Admin | UserType::Customer) => RouteDecision::Redirect(routing.customer_home.clone()),
        };
    }

    if has_prefix(path, &routing.protected_prefixes) && user_type.is_none() {
        return RouteDecision::Redirect(routing.login_page.clone());
    }

    RouteDecision::Proceed
}

/// Edge filter run before any handler.
pub async fn edge_routing_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let identity = resolve_identity(
        request.headers(),
        &state.keys,
        &state.config.security.session_cookie,
    );

    match decide(&path, identity.as_ref().map(|i| i.user_type), &state.config.routing) {
        RouteDecision::Proceed => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!("Redirecting {} -> {}", path, target);
            Redirect::temporary(&target).into_response()
        }
    }
}
