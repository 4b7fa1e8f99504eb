//! # Restaurant Reviews
//!
//! A small relational model of restaurants, customers and the reviews
//! that link them, persisted in a single SQLite file.
//!
//! The crate provides:
//! - Typed entities (`Restaurant`, `Customer`, `Review`) with integer identity
//! - Relationship-derived queries (fanciest restaurant, favorite restaurant,
//!   formatted reviews)
//! - A repository interface implemented by both the SQLite store and an
//!   in-memory arena (`ReviewGraph`)
//! - A demo seed with a couple of sample customers, restaurants and reviews

pub mod id;
pub mod entity;
pub mod restaurant;
pub mod customer;
pub mod review;
pub mod graph;
pub mod storage;
pub mod seed;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use id::{CustomerId, RestaurantId, ReviewId};
pub use entity::Entity;
pub use restaurant::{NewRestaurant, Restaurant};
pub use customer::{Customer, NewCustomer};
pub use review::{NewReview, Review};
pub use graph::ReviewGraph;
pub use storage::{Repository, ReviewIndex, SqliteStore, Store, StoreStats};

/// Result type alias for restaurant review operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for restaurant review operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Empty collection: no {0} to choose from")]
    EmptyCollection(&'static str),

    #[error("Dangling reference: {entity} {id} does not exist")]
    DanglingReference { entity: &'static str, id: i64 },

    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Cannot delete {entity} {id}: still referenced by {reviews} review(s)")]
    StillReferenced {
        entity: &'static str,
        id: i64,
        reviews: usize,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
