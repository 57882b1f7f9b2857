//! Movie persistence contract.
//!
//! The ingestion pipeline and the award aggregator only see
//! [`MovieStore`]; which engine sits behind it is decided once, at startup:
//!
//! - [`InMemoryMovieStore`] - process-local, used by tests and embedders
//! - [`SqliteMovieStore`] - sqlx-backed SQLite database file
//!
//! `find_all` returns records in ascending id order, which is insertion order
//! for both engines.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::models::{MovieFilter, MovieId, MovieRecord, NewMovie};

pub use memory::InMemoryMovieStore;
pub use sqlite::SqliteMovieStore;

/// Operations the core needs from a storage engine.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist all candidates, or none of them.
    async fn insert_many(&self, movies: Vec<NewMovie>) -> StoreResult<()>;

    /// Records matching `filter`, in ascending id order.
    async fn find_all(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>>;

    async fn find_by_id(&self, id: MovieId) -> StoreResult<Option<MovieRecord>>;

    /// Replace every field of an existing record.
    async fn save(&self, movie: &MovieRecord) -> StoreResult<MovieRecord>;

    async fn remove(&self, movie: &MovieRecord) -> StoreResult<()>;
}

/// Shared handle injected into the catalog and the HTTP state.
pub type SharedMovieStore = Arc<dyn MovieStore>;
