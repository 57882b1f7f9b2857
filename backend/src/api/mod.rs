//! HTTP API module.
//!
//! This module provides the HTTP server, response types and the live log
//! feed for the movie awards backend.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{build_router, start_server};
pub use types::*;
