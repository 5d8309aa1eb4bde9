//! Genre lifecycle service

use std::sync::Arc;

use uuid::Uuid;

use super::{fetch_with_books, not_found, CreateOutcome, DeleteOutcome, UpdateOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{BookSummary, Genre, GenreForm},
    repository::CatalogStore,
    validation::{FieldError, FormInput},
};

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List genres in store order
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.genres_list().await
    }

    /// Get a genre together with its books
    pub async fn detail(&self, id: Uuid) -> AppResult<(Genre, Vec<BookSummary>)> {
        let (genre, books) =
            fetch_with_books(self.store.genres_get_by_id(id), self.store.books_by_genre(id))
                .await?;
        let genre = genre.ok_or_else(|| not_found("Genre", id))?;
        Ok((genre, books))
    }

    /// Get a genre to pre-fill the update form
    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.store
            .genres_get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Genre", id))
    }

    /// Create a genre unless one with the same name exists
    pub async fn create(&self, form: GenreForm) -> AppResult<CreateOutcome<Genre>> {
        let form = form.sanitized();
        let errors = form.errors();
        let genre = Genre::from_form(Uuid::new_v4(), &form);
        if !errors.is_empty() {
            return Ok(CreateOutcome::Invalid { entity: genre, errors });
        }

        if let Some(existing) = self.store.genres_find_by_name(&genre.name).await? {
            tracing::info!("Genre create: '{}' already exists as id={}", genre.name, existing.id);
            return Ok(CreateOutcome::Existing(existing));
        }

        match self.store.genres_create(&genre).await {
            Ok(created) => {
                tracing::info!("Genre created: '{}' id={}", created.name, created.id);
                Ok(CreateOutcome::Created(created))
            }
            // Lost a race with a concurrent create of the same name
            Err(AppError::Conflict(msg)) => {
                let existing = self
                    .store
                    .genres_find_by_name(&genre.name)
                    .await?
                    .ok_or(AppError::Conflict(msg))?;
                tracing::info!(
                    "Genre create: '{}' created concurrently as id={}",
                    genre.name,
                    existing.id
                );
                Ok(CreateOutcome::Existing(existing))
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the genre stored under `id`
    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<UpdateOutcome<Genre>> {
        let form = form.sanitized();
        let errors = form.errors();
        let genre = Genre::from_form(id, &form);
        if !errors.is_empty() {
            return Ok(UpdateOutcome::Invalid { entity: genre, errors });
        }

        match self.store.genres_update(&genre).await {
            Ok(updated) => {
                tracing::info!("Genre updated: id={}", updated.id);
                Ok(UpdateOutcome::Updated(updated))
            }
            // Another genre already holds this name; show the form again
            Err(AppError::Conflict(_)) => {
                tracing::info!("Genre update: '{}' is taken, id={} unchanged", genre.name, id);
                let errors = vec![FieldError {
                    field: "name".to_string(),
                    message: format!("Genre {} already exists", genre.name),
                }];
                Ok(UpdateOutcome::Invalid { entity: genre, errors })
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a genre if no book references it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Genre>> {
        let (genre, books) =
            fetch_with_books(self.store.genres_get_by_id(id), self.store.books_by_genre(id))
                .await?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::warn!("Genre delete blocked: id={} has {} book(s)", id, books.len());
            return Ok(DeleteOutcome::Blocked { entity: genre, books });
        }

        self.store.genres_delete(id).await?;
        tracing::info!("Genre deleted: '{}' id={}", genre.name, id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Book,
        repository::{MemoryStore, MockCatalogStore},
    };
    use mockall::Sequence;

    fn service(store: &MemoryStore) -> GenresService {
        GenresService::new(Arc::new(store.clone()))
    }

    fn form(name: &str) -> GenreForm {
        GenreForm { name: name.to_string() }
    }

    async fn created(service: &GenresService, name: &str) -> Genre {
        match service.create(form(name)).await.unwrap() {
            CreateOutcome::Created(genre) => genre,
            other => panic!("expected Created, got {:?}", other),
        }
    }

    async fn add_book(store: &MemoryStore, genre: &Genre, title: &str) {
        let author = crate::models::Author {
            id: Uuid::new_v4(),
            first_name: "Ursula".into(),
            family_name: format!("LeGuin{}", store.counts().await.unwrap().authors),
            date_of_birth: None,
            date_of_death: None,
        };
        store.authors_create(&author).await.unwrap();
        store
            .insert_book(Book {
                id: Uuid::new_v4(),
                title: title.into(),
                summary: "A summary".into(),
                isbn: "9780000000000".into(),
                author_id: author.id,
                genre_id: genre.id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_same_name_twice_redirects_to_existing() {
        let store = MemoryStore::new();
        let service = service(&store);

        let first = created(&service, "Fantasy").await;
        assert_eq!(first.name, "Fantasy");
        assert_eq!(first.url(), format!("/genre/{}", first.id));

        match service.create(form("Fantasy")).await.unwrap() {
            CreateOutcome::Existing(existing) => assert_eq!(existing.url(), first.url()),
            other => panic!("expected Existing, got {:?}", other),
        }
        assert_eq!(store.counts().await.unwrap().genres, 1);
    }

    #[tokio::test]
    async fn test_create_short_name_is_rejected_without_storing() {
        let store = MemoryStore::new();
        match service(&store).create(form(" ab ")).await.unwrap() {
            CreateOutcome::Invalid { entity, errors } => {
                assert_eq!(entity.name, "ab");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(store.counts().await.unwrap().genres, 0);
    }

    #[tokio::test]
    async fn test_create_recovers_from_concurrent_insert() {
        let winner = Genre {
            id: Uuid::new_v4(),
            name: "Horror".into(),
        };
        let found = winner.clone();

        let mut store = MockCatalogStore::new();
        let mut seq = Sequence::new();
        store
            .expect_genres_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_genres_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|g| Err(AppError::Conflict(format!("Genre {} already exists", g.name))));
        store
            .expect_genres_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(found.clone())));

        let service = GenresService::new(Arc::new(store));
        match service.create(form("Horror")).await.unwrap() {
            CreateOutcome::Existing(existing) => assert_eq!(existing.id, winner.id),
            other => panic!("expected Existing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockCatalogStore::new();
        store
            .expect_genres_list()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let err = GenresService::new(Arc::new(store)).list().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_detail_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store).detail(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_overwrites_name() {
        let store = MemoryStore::new();
        let service = service(&store);
        let genre = created(&service, "Scifi").await;

        match service.update(genre.id, form("Science Fiction")).await.unwrap() {
            UpdateOutcome::Updated(updated) => {
                assert_eq!(updated.id, genre.id);
                assert_eq!(updated.url(), genre.url());
                assert_eq!(updated.name, "Science Fiction");
            }
            other => panic!("expected Updated, got {:?}", other),
        }
        assert_eq!(service.get(genre.id).await.unwrap().name, "Science Fiction");
    }

    #[tokio::test]
    async fn test_update_onto_taken_name_rerenders_form() {
        let store = MemoryStore::new();
        let service = service(&store);
        let fantasy = created(&service, "Fantasy").await;
        created(&service, "Horror").await;

        match service.update(fantasy.id, form("Horror")).await.unwrap() {
            UpdateOutcome::Invalid { entity, errors } => {
                assert_eq!(entity.id, fantasy.id);
                assert_eq!(entity.name, "Horror");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Genre Horror already exists");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(service.get(fantasy.id).await.unwrap().name, "Fantasy");
    }

    #[tokio::test]
    async fn test_update_invalid_keeps_route_id() {
        let store = MemoryStore::new();
        let service = service(&store);
        let genre = created(&service, "Poetry").await;

        match service.update(genre.id, form("")).await.unwrap() {
            UpdateOutcome::Invalid { entity, .. } => assert_eq!(entity.id, genre.id),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(service.get(genre.id).await.unwrap().name, "Poetry");
    }

    #[tokio::test]
    async fn test_delete_without_books() {
        let store = MemoryStore::new();
        let service = service(&store);
        let genre = created(&service, "Western").await;

        assert!(matches!(service.delete(genre.id).await.unwrap(), DeleteOutcome::Deleted));
        assert!(store.genres_get_by_id(genre.id).await.unwrap().is_none());
        assert!(matches!(service.delete(genre.id).await.unwrap(), DeleteOutcome::Missing));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_books() {
        let store = MemoryStore::new();
        let service = service(&store);
        let genre = created(&service, "Fantasy").await;
        add_book(&store, &genre, "The Farthest Shore").await;

        match service.delete(genre.id).await.unwrap() {
            DeleteOutcome::Blocked { entity, books } => {
                assert_eq!(entity.id, genre.id);
                assert_eq!(books.len(), 1);
                assert_eq!(books[0].title, "The Farthest Shore");
            }
            other => panic!("expected Blocked, got {:?}", other),
        }
        assert!(store.genres_get_by_id(genre.id).await.unwrap().is_some());
    }
}
