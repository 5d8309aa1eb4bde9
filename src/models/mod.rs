//! Data models for the catalog

pub mod author;
pub mod book;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, DeleteAuthorForm};
pub use book::{Book, BookSummary, CatalogCounts};
pub use genre::{DeleteGenreForm, Genre, GenreForm};
