// handlers/public/mod.rs - Handlers that need no session
//
// The session-echo and login endpoints live here too: they read or issue a
// session but never reject on role.

pub mod auth;
pub mod services;
pub mod setup;
pub mod system;
