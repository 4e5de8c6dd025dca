pub mod admin;
pub mod schema;
pub mod token;
