//! In-process store used in development mode and tests

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookSummary, CatalogCounts, Genre},
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
}

/// Insertion-ordered collections behind a single lock.
///
/// Natural-key checks and inserts happen under the write lock, so two
/// concurrent creates of the same key cannot both succeed.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book referencing an existing author and genre
    pub async fn insert_book(&self, book: Book) -> AppResult<Book> {
        let mut data = self.inner.write().await;
        if !data.authors.contains_key(&book.author_id) {
            return Err(AppError::BadRequest(format!("Author {} not found", book.author_id)));
        }
        if !data.genres.contains_key(&book.genre_id) {
            return Err(AppError::BadRequest(format!("Genre {} not found", book.genre_id)));
        }
        data.books.insert(book.id, book.clone());
        Ok(book)
    }

    fn books_where(data: &Collections, pred: impl Fn(&Book) -> bool) -> Vec<BookSummary> {
        let mut books: Vec<BookSummary> = data
            .books
            .values()
            .filter(|b| pred(b))
            .map(BookSummary::from)
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        books
    }
}

fn same_author(a: &Author, b: &Author) -> bool {
    a.first_name == b.first_name && a.family_name == b.family_name
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let data = self.inner.read().await;
        let mut authors: Vec<Author> = data.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn authors_find_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>> {
        let data = self.inner.read().await;
        Ok(data
            .authors
            .values()
            .find(|a| a.first_name == first_name && a.family_name == family_name)
            .cloned())
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        let mut data = self.inner.write().await;
        if data.authors.values().any(|a| same_author(a, author)) {
            return Err(AppError::Conflict(format!(
                "Author {} {} already exists",
                author.first_name, author.family_name
            )));
        }
        if data.authors.contains_key(&author.id) {
            return Err(AppError::Conflict(format!("Author {} already exists", author.id)));
        }
        data.authors.insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Author> {
        let mut data = self.inner.write().await;
        if data
            .authors
            .values()
            .any(|a| a.id != author.id && same_author(a, author))
        {
            return Err(AppError::Conflict(format!(
                "Author {} {} already exists",
                author.first_name, author.family_name
            )));
        }
        match data.authors.get_mut(&author.id) {
            Some(stored) => {
                *stored = author.clone();
                Ok(author.clone())
            }
            None => Err(AppError::NotFound(format!("Author {} not found", author.id))),
        }
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<()> {
        match self.inner.write().await.authors.shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Author {} not found", id))),
        }
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        Ok(self.inner.read().await.genres.values().cloned().collect())
    }

    async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let data = self.inner.read().await;
        Ok(data.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        let mut data = self.inner.write().await;
        let taken = data.genres.values().any(|g| g.name == genre.name);
        if taken || data.genres.contains_key(&genre.id) {
            return Err(AppError::Conflict(format!("Genre {} already exists", genre.name)));
        }
        data.genres.insert(genre.id, genre.clone());
        Ok(genre.clone())
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Genre> {
        let mut data = self.inner.write().await;
        if data
            .genres
            .values()
            .any(|g| g.id != genre.id && g.name == genre.name)
        {
            return Err(AppError::Conflict(format!("Genre {} already exists", genre.name)));
        }
        match data.genres.get_mut(&genre.id) {
            Some(stored) => {
                *stored = genre.clone();
                Ok(genre.clone())
            }
            None => Err(AppError::NotFound(format!("Genre {} not found", genre.id))),
        }
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        match self.inner.write().await.genres.shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Genre {} not found", id))),
        }
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let data = self.inner.read().await;
        Ok(Self::books_where(&data, |b| b.author_id == author_id))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let data = self.inner.read().await;
        Ok(Self::books_where(&data, |b| b.genre_id == genre_id))
    }

    async fn counts(&self) -> AppResult<CatalogCounts> {
        let data = self.inner.read().await;
        Ok(CatalogCounts {
            books: data.books.len() as i64,
            authors: data.authors.len() as i64,
            genres: data.genres.len() as i64,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
