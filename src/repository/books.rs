//! Book queries on Repository

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{BookSummary, CatalogCounts},
};

impl Repository {
    /// Books written by an author, projected to title and summary
    pub async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books filed under a genre, projected to title and summary
    pub async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE genre_id = $1 ORDER BY title",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count books, authors and genres in one round-trip
    pub async fn books_counts(&self) -> AppResult<CatalogCounts> {
        let (books, authors, genres): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books)::bigint,
                (SELECT COUNT(*) FROM authors)::bigint,
                (SELECT COUNT(*) FROM genres)::bigint
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CatalogCounts { books, authors, genres })
    }
}
