use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::middleware::edge_routing_middleware;
use crate::state::AppState;

/// Full application router. The edge filter wraps every route, including the
/// fallback, so page paths are redirected before anything else answers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        .merge(public_routes())
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(notification_routes())
        .layer(middleware::from_fn_with_state(state.clone(), edge_routing_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{services, setup, system};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/services", get(services::list))
        .route("/api/admin/setup", post(setup::setup))
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/check", get(auth::check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
}

fn admin_routes() -> Router<AppState> {
    use handlers::elevated::admin;

    Router::new()
        .route("/api/admin/bookings", get(admin::bookings_list))
        .route("/api/admin/providers", get(admin::providers_list))
        .route("/api/admin/reviews", get(admin::reviews_list))
        .route("/api/admin/services", get(admin::services_list))
}

fn notification_routes() -> Router<AppState> {
    use handlers::protected::notifications;

    Router::new()
        // Static segment wins over `:id` in the router
        .route("/api/notifications/mark-all-read", patch(notifications::mark_all_read))
        .route("/api/notifications/:id", patch(notifications::mark_read))
        // Empty id segment reaches the handler so it can answer 400
        .route("/api/notifications/", patch(notifications::mark_read))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
