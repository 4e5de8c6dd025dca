// handlers/mod.rs - 3-tier handler layout
//
// Public (no session) → Protected (provider session) → Elevated (admin session)
//
// Every handler resolves the session, runs the role guard where the route
// needs one, validates path identifiers, performs one store operation and
// maps the result to JSON. Errors are caught at the handler boundary.
pub mod elevated;
pub mod protected;
pub mod public;
pub mod utils;
