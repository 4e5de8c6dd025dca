pub mod auth;
pub mod routing;

pub use auth::{require_role, resolve_identity, Session};
pub use routing::{decide, edge_routing_middleware, RouteDecision};
