//! Repository layer for catalog storage

pub mod authors;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, BookSummary, CatalogCounts, Genre},
};

pub use memory::MemoryStore;

/// Storage operations the catalog services rely on.
///
/// `*_create` must reject a document whose natural key is already taken
/// with [`AppError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All authors, by family name then first name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_find_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>>;
    async fn authors_create(&self, author: &Author) -> AppResult<Author>;
    /// Overwrite all fields of the author with `author.id`
    async fn authors_update(&self, author: &Author) -> AppResult<Author>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<()>;

    /// All genres, in insertion order
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre>;
    async fn genres_update(&self, genre: &Genre) -> AppResult<Genre>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<()>;

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>>;

    async fn counts(&self) -> AppResult<CatalogCounts>;
    /// Cheap round-trip used by `/ready`
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Turn a unique-index violation into a `Conflict`
fn unique_violation(err: sqlx::Error, what: String) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(what),
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get_by_id(id).await
    }

    async fn authors_find_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>> {
        self.authors_find_by_name(first_name, family_name).await
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        self.authors_create(author).await
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Author> {
        self.authors_update(author).await
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<()> {
        self.authors_delete(id).await
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }

    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres_get_by_id(id).await
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_find_by_name(name).await
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        self.genres_create(genre).await
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Genre> {
        self.genres_update(genre).await
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        self.genres_delete(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books_by_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books_by_genre(genre_id).await
    }

    async fn counts(&self) -> AppResult<CatalogCounts> {
        self.books_counts().await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
