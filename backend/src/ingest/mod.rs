//! Movie list ingestion: parse, validate every row, then one bulk insert.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV bytes  │────▶│   Parser    │────▶│  Validator  │────▶│ insert_many │
//! │ (`;`, auto- │     │  (rows as   │     │ (accept or  │     │ (one call,  │
//! │  encoding)  │     │   JSON)     │     │  drop row)  │     │  all rows)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Rejected rows are dropped without per-row diagnostics, and malformed
//! input never fails the batch: a file whose rows all miss the expected
//! columns ingests zero movies and still succeeds. The insert is issued even
//! when there is nothing to insert.
//!
//! `inserted_count` is the number of candidates handed to the store; the
//! store either takes the whole batch or returns an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::{CatalogResult, StoreResult};
use crate::models::NewMovie;
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};
use crate::store::MovieStore;
use crate::validation::{validate_row, RowVerdict};

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Candidates submitted to the store.
    pub inserted_count: usize,
    /// Rows dropped by validation.
    pub rejected_count: usize,
    pub batch_id: Uuid,
}

/// Accepted candidates of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub movies: Vec<NewMovie>,
    pub rejected: usize,
}

/// Validate every row, keeping accepted candidates in order.
pub fn collect_candidates(rows: &[Value]) -> Candidates {
    let mut candidates = Candidates::default();

    for row in rows {
        match validate_row(row) {
            RowVerdict::Accepted(movie) => candidates.movies.push(movie),
            RowVerdict::Rejected(_) => candidates.rejected += 1,
        }
    }

    candidates
}

/// Validate parsed rows and write the accepted ones in a single bulk insert.
pub async fn ingest_rows(store: &dyn MovieStore, rows: &[Value]) -> StoreResult<IngestReport> {
    let batch_id = Uuid::new_v4();

    async move {
        let Candidates { movies, rejected } = collect_candidates(rows);
        let inserted_count = movies.len();

        store.insert_many(movies).await?;

        log_success(format!("Ingested {} movies", inserted_count));
        if rejected > 0 {
            log_warning(format!("{} rows did not match the movie schema", rejected));
        }

        Ok(IngestReport {
            inserted_count,
            rejected_count: rejected,
            batch_id,
        })
    }
    .instrument(tracing::info_span!("ingest", %batch_id))
    .await
}

/// Parse raw CSV bytes and ingest them.
pub async fn ingest_bytes(store: &dyn MovieStore, bytes: &[u8]) -> StoreResult<IngestReport> {
    let parsed = parse_bytes_auto(bytes);
    log_parsed(&parsed, bytes.len());
    ingest_rows(store, &parsed.records).await
}

/// Read a CSV file and ingest it.
pub async fn ingest_file(store: &dyn MovieStore, path: &Path) -> CatalogResult<IngestReport> {
    log_info(format!("Reading movie list {}", path.display()));
    let parsed = parse_csv_file_auto(path).await?;
    log_parsed(&parsed, 0);
    Ok(ingest_rows(store, &parsed.records).await?)
}

fn log_parsed(parsed: &ParseResult, size: usize) {
    if size > 0 {
        log_info(format!("Received {} bytes ({})", size, parsed.encoding));
    }
    log_info(format!(
        "Read {} rows, columns: {}",
        parsed.records.len(),
        parsed.headers.join(", ")
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieFilter;
    use crate::store::InMemoryMovieStore;

    const HEADER: &str = "year;title;studios;producers;winner\n";

    #[tokio::test]
    async fn test_valid_rows_are_stored() {
        let store = InMemoryMovieStore::new();
        let csv = format!(
            "{HEADER}\
             2020;Test Movie 1;Test Studio 1;Test Producer 1;yes\n\
             2021;Test Movie 2;Test Studio 2;Test Producer 2;\n\
             2022;Test Movie 3;Test Studio 3;Test Producer 3;yes\n"
        );

        let report = ingest_bytes(&store, csv.as_bytes()).await.unwrap();
        assert_eq!(report.inserted_count, 3);
        assert_eq!(report.rejected_count, 0);

        let movies = store.find_all(MovieFilter::all()).await.unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].title, "Test Movie 1");
        assert_eq!(movies[0].year, 2020);
        assert_eq!(movies[1].winner.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_invalid_rows_excluded() {
        let store = InMemoryMovieStore::new();
        let csv = format!(
            "{HEADER}\
             2000;Kept;Studio;Producer;yes\n\
             2001;;Studio;Producer;yes\n\
             abcd;Bad Year;Studio;Producer;\n\
             2003;Long Winner;Studio;Producer;true\n"
        );

        let report = ingest_bytes(&store, csv.as_bytes()).await.unwrap();
        assert_eq!(report.inserted_count, 1);
        assert_eq!(report.rejected_count, 3);

        let titles: Vec<String> = store
            .find_all(MovieFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Kept"]);
    }

    #[tokio::test]
    async fn test_header_only_succeeds_with_zero() {
        let store = InMemoryMovieStore::new();
        let report = ingest_bytes(&store, HEADER.as_bytes()).await.unwrap();

        assert_eq!(report.inserted_count, 0);
        assert!(store.find_all(MovieFilter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_format_succeeds_with_zero() {
        let store = InMemoryMovieStore::new();
        let report = ingest_bytes(&store, b"This is not a CSV file\nstill not one\n")
            .await
            .unwrap();

        assert_eq!(report.inserted_count, 0);
        assert_eq!(report.rejected_count, 1);
        assert!(store.find_all(MovieFilter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_succeeds_with_zero() {
        let store = InMemoryMovieStore::new();
        let report = ingest_bytes(&store, b"").await.unwrap();
        assert_eq!(report.inserted_count, 0);
        assert_eq!(report.rejected_count, 0);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let store = InMemoryMovieStore::new();
        let csv = format!("{HEADER}1980;Same;Studio;Producer;yes\n1980;Same;Studio;Producer;yes\n");

        let report = ingest_bytes(&store, csv.as_bytes()).await.unwrap();
        assert_eq!(report.inserted_count, 2);
        assert_eq!(store.find_all(MovieFilter::all()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ingest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movielist.csv");
        std::fs::write(&path, format!("{HEADER}1980;Can't Stop the Music;AFD;Allan Carr;yes\n")).unwrap();

        let store = InMemoryMovieStore::new();
        let report = ingest_file(&store, &path).await.unwrap();
        assert_eq!(report.inserted_count, 1);

        assert!(ingest_file(&store, &dir.path().join("missing.csv")).await.is_err());
    }

    #[test]
    fn test_collect_candidates_keeps_order() {
        let (_, rows) = crate::parser::parse_csv(
            format!("{HEADER}2002;B;S;P;\n2001;A;S;P;\n").as_bytes(),
        );
        let candidates = collect_candidates(&rows);
        let years: Vec<i64> = candidates.movies.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2002, 2001]);
    }
}
