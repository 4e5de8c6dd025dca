pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod shape;
pub mod store;

pub use manager::{connect, DatabaseError};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::Repository;
pub use store::Store;
