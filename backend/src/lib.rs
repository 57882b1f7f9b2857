//! # Movie Awards - award interval service
//!
//! Ingests `;`-delimited movie lists, keeps them in a movie store and reports
//! the producers with the shortest and longest gap between consecutive wins.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Validation │────▶│ MovieStore  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (row schema)│     │ (sqlite/mem)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │ winners
//!                                                             ┌──────▼──────┐
//!                                                             │   Awards    │
//!                                                             │ (min / max) │
//!                                                             └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use movie_awards::{InMemoryMovieStore, MovieCatalog};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = MovieCatalog::new(Arc::new(InMemoryMovieStore::new()));
//!     catalog.ingest_file("movielist.csv".as_ref()).await.unwrap();
//!     let awards = catalog.awards_interval().await.unwrap();
//!     println!("{} producers at the minimum interval", awards.min.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - Domain models (NewMovie, MovieRecord, IntervalRecord)
//! - [`parser`] - CSV parsing with encoding detection
//! - [`validation`] - Row schema validation
//! - [`store`] - MovieStore contract and backends
//! - [`awards`] - Producer splitting and interval aggregation
//! - [`ingest`] - Upload ingestion pipeline
//! - [`catalog`] - Caller-facing operations
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Storage
pub mod store;

// Aggregation
pub mod awards;

// Operations
pub mod catalog;
pub mod ingest;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CatalogError,
    CatalogResult,
    ConfigError,
    CsvError,
    ServerError,
    StoreError,
    StoreResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AwardsResult,
    IntervalRecord,
    MovieFilter,
    MovieId,
    MoviePatch,
    MovieRecord,
    NewMovie,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    parse_bytes_auto,
    parse_csv,
    parse_csv_file_auto,
    ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_row, validate_row, RowVerdict};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{InMemoryMovieStore, MovieStore, SharedMovieStore, SqliteMovieStore};

// =============================================================================
// Re-exports - Awards
// =============================================================================

pub use awards::{award_intervals, select_extremes, split_producers, ProducerWinYears};

// =============================================================================
// Re-exports - Ingestion and catalog
// =============================================================================

pub use catalog::MovieCatalog;
pub use config::AppConfig;
pub use ingest::{ingest_bytes, ingest_rows, IngestReport};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::{build_router, start_server};
}
