//! Operations exposed to callers (HTTP handlers, CLI).
//!
//! [`MovieCatalog`] owns the injected store and maps each caller-facing
//! operation onto the store contract. It keeps no state of its own: every
//! award query rereads the winners.

use std::path::Path;

use crate::api::logs::{log_error, log_info};
use crate::awards::award_intervals;
use crate::error::{CatalogError, CatalogResult};
use crate::ingest::{self, IngestReport};
use crate::models::{AwardsResult, MovieFilter, MovieId, MoviePatch, MovieRecord};
use crate::store::SharedMovieStore;

#[derive(Clone)]
pub struct MovieCatalog {
    store: SharedMovieStore,
}

impl MovieCatalog {
    pub fn new(store: SharedMovieStore) -> Self {
        Self { store }
    }

    /// Ingest an uploaded `;`-delimited movie list.
    pub async fn ingest(&self, bytes: &[u8]) -> CatalogResult<IngestReport> {
        ingest::ingest_bytes(self.store.as_ref(), bytes)
            .await
            .map_err(|e| {
                log_error(format!("Ingestion failed: {}", e));
                CatalogError::from(e)
            })
    }

    /// Ingest a movie list file from disk.
    pub async fn ingest_file(&self, path: &Path) -> CatalogResult<IngestReport> {
        ingest::ingest_file(self.store.as_ref(), path).await
    }

    pub async fn list(&self) -> CatalogResult<Vec<MovieRecord>> {
        Ok(self.store.find_all(MovieFilter::all()).await?)
    }

    /// Merge `patch` into movie `id` and persist it.
    pub async fn edit(&self, id: MovieId, patch: MoviePatch) -> CatalogResult<MovieRecord> {
        let mut movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        movie.apply(patch);
        let saved = self.store.save(&movie).await?;
        tracing::debug!(id, "Movie updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: MovieId) -> CatalogResult<()> {
        let movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        self.store.remove(&movie).await?;
        tracing::debug!(id, "Movie deleted");
        Ok(())
    }

    /// Producers with the shortest and longest gap between consecutive wins.
    pub async fn awards_interval(&self) -> CatalogResult<AwardsResult> {
        let winners = self.store.find_all(MovieFilter::winners()).await?;
        let result = award_intervals(&winners);

        log_info(format!(
            "Award intervals over {} winning movies: {} min, {} max",
            winners.len(),
            result.min.len(),
            result.max.len()
        ));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalRecord;
    use crate::store::InMemoryMovieStore;
    use std::sync::Arc;

    const MOVIES: &str = "year;title;studios;producers;winner\n\
        2000;First;Studio A;Producer X;yes\n\
        2002;Second;Studio A;Producer X;yes\n\
        2005;Loser;Studio B;Producer X;\n\
        2010;Third;Studio B;Producer Y;yes\n\
        2015;Fourth;Studio A;Producer X;yes\n\
        2020;Fifth;Studio C;Producer Y;yes\n";

    async fn catalog() -> MovieCatalog {
        let catalog = MovieCatalog::new(Arc::new(InMemoryMovieStore::new()));
        catalog.ingest(MOVIES.as_bytes()).await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_awards_interval() {
        let result = catalog().await.awards_interval().await.unwrap();

        assert_eq!(
            result.min,
            vec![IntervalRecord {
                producer: "Producer X".into(),
                interval: 2,
                previous_win: 2000,
                following_win: 2002,
            }]
        );
        assert_eq!(
            result.max,
            vec![IntervalRecord {
                producer: "Producer X".into(),
                interval: 13,
                previous_win: 2002,
                following_win: 2015,
            }]
        );
    }

    #[tokio::test]
    async fn test_awards_interval_empty_store() {
        let catalog = MovieCatalog::new(Arc::new(InMemoryMovieStore::new()));
        assert_eq!(catalog.awards_interval().await.unwrap(), AwardsResult::default());
    }

    #[tokio::test]
    async fn test_awards_interval_rereads_store() {
        let catalog = catalog().await;
        let first = catalog.list().await.unwrap().remove(0);
        catalog.delete(first.id).await.unwrap();

        // Producer X now wins in 2002 and 2015 only.
        let result = catalog.awards_interval().await.unwrap();
        assert_eq!(result.min.len(), 1);
        assert_eq!(result.min[0].producer, "Producer Y");
        assert_eq!(result.min[0].interval, 10);
        assert_eq!(result.max[0].previous_win, 2002);
    }

    #[tokio::test]
    async fn test_awards_interval_extreme_years() {
        let catalog = MovieCatalog::new(Arc::new(InMemoryMovieStore::new()));
        let csv = "year;title;studios;producers;winner\n\
            -9223372036854775808;A;Studio;Producer P;yes\n\
            9223372036854775807;B;Studio;Producer P;yes\n";
        let report = catalog.ingest(csv.as_bytes()).await.unwrap();
        assert_eq!(report.inserted_count, 2);

        let result = catalog.awards_interval().await.unwrap();
        assert_eq!(result.min, result.max);
        assert_eq!(result.max[0].interval, u64::MAX);

        // Edits reach the same aggregation unvalidated.
        let movies = catalog.list().await.unwrap();
        catalog
            .edit(movies[1].id, MoviePatch { year: Some(0), ..Default::default() })
            .await
            .unwrap();
        let result = catalog.awards_interval().await.unwrap();
        assert_eq!(result.max[0].interval, i64::MIN.unsigned_abs());
        assert_eq!(result.max[0].following_win, 0);
    }

    #[tokio::test]
    async fn test_edit_clears_winner() {
        let catalog = catalog().await;
        let first = catalog.list().await.unwrap().remove(0);

        let edited = catalog
            .edit(first.id, MoviePatch { winner: Some(None), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(edited.winner, None);

        // Producer X now wins in 2002 and 2015 only.
        let result = catalog.awards_interval().await.unwrap();
        assert_eq!(result.max[0].previous_win, 2002);
    }

    #[tokio::test]
    async fn test_edit_merges_fields() {
        let catalog = catalog().await;
        let original = catalog.list().await.unwrap().remove(0);

        let edited = catalog
            .edit(
                original.id,
                MoviePatch {
                    title: Some("New Title".into()),
                    year: Some(2001),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.title, "New Title");
        assert_eq!(edited.year, 2001);
        assert_eq!(edited.studios, original.studios);
        assert_eq!(edited.producers, original.producers);
        assert_eq!(edited.winner, original.winner);
        assert_eq!(catalog.list().await.unwrap()[0], edited);
    }

    #[tokio::test]
    async fn test_edit_missing_id_is_not_found() {
        let catalog = catalog().await;
        let before = catalog.list().await.unwrap();

        let err = catalog
            .edit(99, MoviePatch { title: Some("X".into()), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(99)));
        assert_eq!(catalog.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = catalog().await;
        let before = catalog.list().await.unwrap();

        let err = catalog.delete(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(99)));
        assert_eq!(catalog.list().await.unwrap(), before);

        catalog.delete(before[1].id).await.unwrap();
        let after = catalog.list().await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|m| m.id != before[1].id));
    }
}
