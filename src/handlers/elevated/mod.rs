// handlers/elevated/mod.rs - Admin handlers
//
// Security Level: admin session required (401 otherwise)
// Route Prefix: /api/admin/*

pub mod admin;
