//! Book model (read-only from the catalog's point of view)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_id: Uuid,
}

/// Book projected to what author/genre pages list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

/// Document counts shown on the catalog home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub authors: i64,
    pub genres: i64,
}
