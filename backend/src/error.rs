//! Error types for the movie awards service.
//!
//! One enum per layer:
//!
//! - [`CsvError`] - the uploaded input could not be read
//! - [`StoreError`] - the persistence layer failed
//! - [`CatalogError`] - catalog operations (`NotFound` or a store failure)
//! - [`ConfigError`] - invalid environment configuration
//! - [`ServerError`] - HTTP server startup and serving
//!
//! Row validation failures are not errors: they are the
//! [`RowVerdict::Rejected`](crate::validation::RowVerdict) branch and never
//! leave the ingestion pipeline.

use thiserror::Error;

use crate::models::MovieId;

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors while reading raw CSV input.
///
/// Malformed rows are never reported here; only input that cannot be read at
/// all. Undecodable bytes are replaced, not reported.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from a [`MovieStore`](crate::store::MovieStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// `save` was called for a record the store does not hold.
    #[error("Movie {0} is not stored")]
    MissingRecord(MovieId),

    /// Filesystem error while preparing the database location.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors surfaced by [`MovieCatalog`](crate::catalog::MovieCatalog) operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No movie has the requested id.
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    /// The store could not complete the operation.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// The uploaded input could not be read.
    #[error("Input error: {0}")]
    Input(#[from] CsvError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store could not be opened.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Socket bind or serve failure.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV input operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
