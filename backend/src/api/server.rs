//! HTTP server for the movie awards API.
//!
//! # API Endpoints
//!
//! | Method | Path                  | Description                              |
//! |--------|-----------------------|------------------------------------------|
//! | GET    | `/health`             | Health check                             |
//! | POST   | `/v1/movies/upload`   | Upload a `;`-delimited movie list        |
//! | GET    | `/v1/movies`          | List stored movies                       |
//! | PUT    | `/v1/movies/{id}`     | Merge fields into a movie                |
//! | DELETE | `/v1/movies/{id}`     | Delete a movie                           |
//! | GET    | `/v1/movies/awards`   | Min/max producer win intervals           |
//! | GET    | `/v1/movies/logs`     | SSE stream of pipeline logs              |

use axum::{
    extract::{Multipart, Path, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post, put},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::logs::LOG_BROADCASTER;
use super::types::{catalog_error, error_response, ApiError, UploadResponse};
use crate::catalog::MovieCatalog;
use crate::config::AppConfig;
use crate::error::ServerResult;
use crate::models::{AwardsResult, MovieId, MoviePatch, MovieRecord};

/// Build the application router around a catalog.
pub fn build_router(catalog: MovieCatalog) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/v1/movies", get(list_movies))
        .route("/v1/movies/upload", post(upload_movies))
        .route("/v1/movies/awards", get(awards_interval))
        .route("/v1/movies/logs", get(sse_logs))
        .route("/v1/movies/{id}", put(edit_movie).delete(delete_movie))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(catalog)
}

/// Start the HTTP server
pub async fn start_server(config: &AppConfig, catalog: MovieCatalog) -> ServerResult<()> {
    let app = build_router(catalog);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Movie awards server running on http://{}", addr);
    tracing::info!("POST /v1/movies/upload - Upload movie list");
    tracing::info!("GET  /v1/movies/awards - Producer award intervals");
    tracing::info!("GET  /v1/movies/logs   - SSE log stream");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "movie-awards",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /v1/movies/upload",
            "movies": "GET /v1/movies",
            "awards": "GET /v1/movies/awards",
            "logs": "GET /v1/movies/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload CSV endpoint
async fn upload_movies(
    State(catalog): State<MovieCatalog>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(error_response(&format!("Multipart error: {}", e))))
    })? {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        (StatusCode::BAD_REQUEST, Json(error_response(&format!("Read error: {}", e))))
                    })?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data
        .ok_or_else(|| (StatusCode::BAD_REQUEST, Json(error_response("No file provided"))))?;

    tracing::info!(
        "Upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    );

    let report = catalog.ingest(&bytes).await.map_err(catalog_error)?;

    Ok((StatusCode::CREATED, Json(UploadResponse::from(report))))
}

async fn list_movies(State(catalog): State<MovieCatalog>) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let movies = catalog.list().await.map_err(catalog_error)?;
    Ok(Json(movies))
}

async fn edit_movie(
    State(catalog): State<MovieCatalog>,
    Path(id): Path<MovieId>,
    Json(patch): Json<MoviePatch>,
) -> Result<Json<MovieRecord>, ApiError> {
    let movie = catalog.edit(id, patch).await.map_err(catalog_error)?;
    Ok(Json(movie))
}

async fn delete_movie(
    State(catalog): State<MovieCatalog>,
    Path(id): Path<MovieId>,
) -> Result<StatusCode, ApiError> {
    catalog.delete(id).await.map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn awards_interval(State(catalog): State<MovieCatalog>) -> Result<Json<AwardsResult>, ApiError> {
    let result = catalog.awards_interval().await.map_err(catalog_error)?;
    Ok(Json(result))
}
