// handlers/protected/mod.rs - Provider handlers
//
// Security Level: serviceProvider session required
// Route Prefix: /api/notifications/*
//
// Ownership is checked per request against the provider resolved from the
// session email; a foreign row is reported exactly like a missing one.

pub mod notifications;
