//! REST API response types.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::ingest::IngestReport;

/// Message returned by a successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Movies uploaded successfully!";

/// Message returned when an edit or delete target does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<Value>);

/// Response sent after a CSV upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Rows submitted to the store
    pub inserted_count: usize,
    /// Rows dropped by validation
    pub rejected_count: usize,
    pub batch_id: Uuid,
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        UploadResponse {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            inserted_count: report.inserted_count,
            rejected_count: report.rejected_count,
            batch_id: report.batch_id,
        }
    }
}

/// Create an error body
pub fn error_response(message: &str) -> Value {
    json!({ "message": message })
}

/// Map a catalog error onto a status code and body.
pub fn catalog_error(err: CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, Json(error_response(NOT_FOUND_MESSAGE))),
        CatalogError::Input(e) => (StatusCode::BAD_REQUEST, Json(error_response(&e.to_string()))),
        CatalogError::Store(e) => {
            tracing::error!("Store failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_response(&format!("Store failure: {}", e))),
            )
        }
    }
}
