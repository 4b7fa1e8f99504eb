//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - restaurants(id, name, price)
//! - customers(id, first_name, last_name)
//! - reviews(id, star_rating, customer_id, restaurant_id)

pub mod repository;
pub mod schema;
pub mod sqlite;

pub use repository::{Repository, ReviewIndex, Store, StoreStats};
pub use sqlite::SqliteStore;
