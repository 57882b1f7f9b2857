//! Process-local movie store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MovieStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{MovieFilter, MovieId, MovieRecord, NewMovie};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: MovieId,
    /// Kept sorted by id.
    movies: Vec<MovieRecord>,
}

/// Movie store backed by a vector behind a lock. Ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    state: RwLock<MemoryState>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn insert_many(&self, movies: Vec<NewMovie>) -> StoreResult<()> {
        let mut state = self.state.write().await;
        for movie in movies {
            state.last_id += 1;
            let id = state.last_id;
            state.movies.push(MovieRecord::from_new(id, movie));
        }
        Ok(())
    }

    async fn find_all(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        let state = self.state.read().await;
        Ok(state
            .movies
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MovieId) -> StoreResult<Option<MovieRecord>> {
        let state = self.state.read().await;
        Ok(state.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn save(&self, movie: &MovieRecord) -> StoreResult<MovieRecord> {
        let mut state = self.state.write().await;
        let slot = state
            .movies
            .iter_mut()
            .find(|m| m.id == movie.id)
            .ok_or(StoreError::MissingRecord(movie.id))?;
        *slot = movie.clone();
        Ok(movie.clone())
    }

    async fn remove(&self, movie: &MovieRecord) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.movies.retain(|m| m.id != movie.id);
        Ok(())
    }
}
