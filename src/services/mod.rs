//! Business logic services

pub mod authors;
pub mod catalog;
pub mod genres;

use std::{future::Future, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::BookSummary,
    repository::CatalogStore,
    validation::FieldError,
};

/// Result of submitting a create form
#[derive(Debug)]
pub enum CreateOutcome<T> {
    /// A new document was stored
    Created(T),
    /// A document with the same natural key already existed; nothing was stored
    Existing(T),
    /// The form was rejected; `entity` carries the submitted values
    Invalid { entity: T, errors: Vec<FieldError> },
}

/// Result of submitting an update form
#[derive(Debug)]
pub enum UpdateOutcome<T> {
    Updated(T),
    Invalid { entity: T, errors: Vec<FieldError> },
}

/// Result of confirming a delete
#[derive(Debug)]
pub enum DeleteOutcome<T> {
    Deleted,
    /// Nothing stored under that id
    Missing,
    /// Books still reference the entity; it was left in place
    Blocked { entity: T, books: Vec<BookSummary> },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            catalog: catalog::CatalogService::new(store),
        }
    }
}

/// Fetch an entity and the books referencing it concurrently.
async fn fetch_with_books<T>(
    entity: impl Future<Output = AppResult<Option<T>>>,
    books: impl Future<Output = AppResult<Vec<BookSummary>>>,
) -> AppResult<(Option<T>, Vec<BookSummary>)> {
    tokio::try_join!(entity, books)
}

fn not_found(kind: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}
