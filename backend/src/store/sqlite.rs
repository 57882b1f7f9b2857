//! SQLite movie store (sqlx).
//!
//! The `movies` table is created on connect when missing, and a file
//! database is created together with its parent directory.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

use super::MovieStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{MovieFilter, MovieId, MovieRecord, NewMovie};

const CREATE_MOVIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER NOT NULL,
        title VARCHAR(255) NOT NULL,
        studios VARCHAR(255) NOT NULL,
        producers VARCHAR(255) NOT NULL,
        winner VARCHAR(3) NULL
    )
"#;

const SELECT_MOVIES: &str = "SELECT id, year, title, studios, producers, winner FROM movies";

/// Movie store backed by an SQLite pool.
#[derive(Clone)]
pub struct SqliteMovieStore {
    pool: Pool<Sqlite>,
}

impl SqliteMovieStore {
    /// Open (creating if needed) the database at `url`, e.g.
    /// `sqlite://.data/database.sqlite` or `sqlite::memory:`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        // An in-memory database lives as long as its connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;

        tracing::info!("Movie store ready at {}", url);
        Ok(store)
    }

    pub fn pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    /// Create the `movies` table if it does not exist.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_MOVIES_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

fn movie_from_row(row: &SqliteRow) -> Result<MovieRecord, sqlx::Error> {
    Ok(MovieRecord {
        id: row.try_get("id")?,
        year: row.try_get("year")?,
        title: row.try_get("title")?,
        studios: row.try_get("studios")?,
        producers: row.try_get("producers")?,
        winner: row.try_get("winner")?,
    })
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn insert_many(&self, movies: Vec<NewMovie>) -> StoreResult<()> {
        if movies.is_empty() {
            return Ok(());
        }

        let count = movies.len();
        let mut transaction = self.pool.begin().await?;

        for movie in movies {
            sqlx::query(
                "INSERT INTO movies (year, title, studios, producers, winner) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(movie.year)
            .bind(movie.title)
            .bind(movie.studios)
            .bind(movie.producers)
            .bind(movie.winner)
            .execute(&mut *transaction)
            .await?;
        }

        transaction.commit().await?;
        tracing::debug!("Inserted {} movies", count);
        Ok(())
    }

    async fn find_all(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        let rows = match filter.winner {
            Some(winner) => {
                let sql = format!("{SELECT_MOVIES} WHERE winner = ? ORDER BY id");
                sqlx::query(&sql).bind(winner).fetch_all(&self.pool).await?
            }
            None => {
                let sql = format!("{SELECT_MOVIES} ORDER BY id");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        let movies = rows
            .iter()
            .map(movie_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(movies)
    }

    async fn find_by_id(&self, id: MovieId) -> StoreResult<Option<MovieRecord>> {
        let sql = format!("{SELECT_MOVIES} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(movie_from_row).transpose()?)
    }

    async fn save(&self, movie: &MovieRecord) -> StoreResult<MovieRecord> {
        let result = sqlx::query(
            "UPDATE movies SET year = ?, title = ?, studios = ?, producers = ?, winner = ? WHERE id = ?",
        )
        .bind(movie.year)
        .bind(&movie.title)
        .bind(&movie.studios)
        .bind(&movie.producers)
        .bind(&movie.winner)
        .bind(movie.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingRecord(movie.id));
        }
        Ok(movie.clone())
    }

    async fn remove(&self, movie: &MovieRecord) -> StoreResult<()> {
        sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(movie.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
