//! Author lifecycle service

use std::sync::Arc;

use uuid::Uuid;

use super::{fetch_with_books, not_found, CreateOutcome, DeleteOutcome, UpdateOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, BookSummary},
    repository::CatalogStore,
    validation::{FieldError, FormInput},
};

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List authors by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.authors_list().await
    }

    /// Get an author together with the books they wrote
    pub async fn detail(&self, id: Uuid) -> AppResult<(Author, Vec<BookSummary>)> {
        let (author, books) =
            fetch_with_books(self.store.authors_get_by_id(id), self.store.books_by_author(id))
                .await?;
        let author = author.ok_or_else(|| not_found("Author", id))?;
        Ok((author, books))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.store
            .authors_get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Author", id))
    }

    /// Create an author unless one with the same first and family name exists
    pub async fn create(&self, form: AuthorForm) -> AppResult<CreateOutcome<Author>> {
        let form = form.sanitized();
        let errors = form.errors();
        let author = Author::from_form(Uuid::new_v4(), &form);
        if !errors.is_empty() {
            return Ok(CreateOutcome::Invalid { entity: author, errors });
        }

        if let Some(existing) = self.find_by_name(&author).await? {
            tracing::info!(
                "Author create: '{}' already exists as id={}",
                author.name(),
                existing.id
            );
            return Ok(CreateOutcome::Existing(existing));
        }

        match self.store.authors_create(&author).await {
            Ok(created) => {
                tracing::info!("Author created: '{}' id={}", created.name(), created.id);
                Ok(CreateOutcome::Created(created))
            }
            Err(AppError::Conflict(msg)) => {
                let existing = self.find_by_name(&author).await?.ok_or(AppError::Conflict(msg))?;
                tracing::info!(
                    "Author create: '{}' created concurrently as id={}",
                    author.name(),
                    existing.id
                );
                Ok(CreateOutcome::Existing(existing))
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the author stored under `id`
    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<UpdateOutcome<Author>> {
        let form = form.sanitized();
        let errors = form.errors();
        let author = Author::from_form(id, &form);
        if !errors.is_empty() {
            return Ok(UpdateOutcome::Invalid { entity: author, errors });
        }

        match self.store.authors_update(&author).await {
            Ok(updated) => {
                tracing::info!("Author updated: id={}", updated.id);
                Ok(UpdateOutcome::Updated(updated))
            }
            // Another author already holds this name pair; show the form again
            Err(AppError::Conflict(_)) => {
                tracing::info!("Author update: '{}' is taken, id={} unchanged", author.name(), id);
                let errors = vec![FieldError {
                    field: "first_name".to_string(),
                    message: format!(
                        "Author {} {} already exists",
                        author.first_name, author.family_name
                    ),
                }];
                Ok(UpdateOutcome::Invalid { entity: author, errors })
            }
            Err(e) => Err(e),
        }
    }

    /// Delete an author if no book references them
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Author>> {
        let (author, books) =
            fetch_with_books(self.store.authors_get_by_id(id), self.store.books_by_author(id))
                .await?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::warn!("Author delete blocked: id={} has {} book(s)", id, books.len());
            return Ok(DeleteOutcome::Blocked { entity: author, books });
        }

        self.store.authors_delete(id).await?;
        tracing::info!("Author deleted: '{}' id={}", author.name(), id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn find_by_name(&self, author: &Author) -> AppResult<Option<Author>> {
        self.store
            .authors_find_by_name(&author.first_name, &author.family_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Book, Genre},
        repository::MemoryStore,
    };

    fn service(store: &MemoryStore) -> AuthorsService {
        AuthorsService::new(Arc::new(store.clone()))
    }

    fn form(first: &str, family: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            ..Default::default()
        }
    }

    async fn created(service: &AuthorsService, form: AuthorForm) -> Author {
        match service.create(form).await.unwrap() {
            CreateOutcome::Created(author) => author,
            other => panic!("expected Created, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_non_alphanumeric_first_name_is_rejected() {
        let store = MemoryStore::new();
        match service(&store).create(form("John2!", "Smith")).await.unwrap() {
            CreateOutcome::Invalid { entity, errors } => {
                assert_eq!(entity.first_name, "John2!");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "first_name");
                assert_eq!(errors[0].message, "First name has non-alphanumeric characters.");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(store.counts().await.unwrap().authors, 0);
    }

    #[tokio::test]
    async fn test_create_trims_and_parses_dates() {
        let store = MemoryStore::new();
        let mut f = form("  Isaac ", " Asimov");
        f.date_of_birth = "1920-01-02".into();
        f.date_of_death = "  ".into();

        let author = created(&service(&store), f).await;
        assert_eq!(author.first_name, "Isaac");
        assert_eq!(author.family_name, "Asimov");
        assert_eq!(author.date_of_birth, chrono::NaiveDate::from_ymd_opt(1920, 1, 2));
        assert_eq!(author.date_of_death, None);
    }

    #[tokio::test]
    async fn test_create_same_name_returns_existing() {
        let store = MemoryStore::new();
        let service = service(&store);
        let first = created(&service, form("Ann", "Leckie")).await;

        match service.create(form(" Ann", "Leckie ")).await.unwrap() {
            CreateOutcome::Existing(existing) => assert_eq!(existing.url(), first.url()),
            other => panic!("expected Existing, got {:?}", other),
        }
        assert_eq!(store.counts().await.unwrap().authors, 1);
    }

    #[tokio::test]
    async fn test_update_preserves_identifier() {
        let store = MemoryStore::new();
        let service = service(&store);
        let author = created(&service, form("Ben", "Bova")).await;

        let mut f = form("Benjamin", "Bova");
        f.date_of_birth = "1932-11-08".into();
        f.date_of_death = "2020-11-29".into();
        match service.update(author.id, f).await.unwrap() {
            UpdateOutcome::Updated(updated) => {
                assert_eq!(updated.id, author.id);
                assert_eq!(updated.url(), author.url());
                assert_eq!(updated.first_name, "Benjamin");
                assert_eq!(updated.date_of_death, chrono::NaiveDate::from_ymd_opt(2020, 11, 29));
            }
            other => panic!("expected Updated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_onto_taken_name_rerenders_form() {
        let store = MemoryStore::new();
        let service = service(&store);
        let ben = created(&service, form("Ben", "Bova")).await;
        created(&service, form("Ann", "Leckie")).await;

        match service.update(ben.id, form("Ann", "Leckie")).await.unwrap() {
            UpdateOutcome::Invalid { entity, errors } => {
                assert_eq!(entity.id, ben.id);
                assert_eq!(entity.first_name, "Ann");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "first_name");
                assert_eq!(errors[0].message, "Author Ann Leckie already exists");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(service.get(ben.id).await.unwrap().first_name, "Ben");
    }

    #[tokio::test]
    async fn test_update_unknown_author_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store)
            .update(Uuid::new_v4(), form("Jim", "Jones"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_detail() {
        let store = MemoryStore::new();
        let service = service(&store);

        let err = service.detail(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let author = created(&service, form("Patrick", "Rothfuss")).await;
        let (found, books) = service.detail(author.id).await.unwrap();
        assert_eq!(found, author);
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_delete_blocked_then_allowed() {
        let store = MemoryStore::new();
        let service = service(&store);
        let author = created(&service, form("Patrick", "Rothfuss")).await;
        let genre = Genre {
            id: Uuid::new_v4(),
            name: "Fantasy".into(),
        };
        store.genres_create(&genre).await.unwrap();
        store
            .insert_book(Book {
                id: Uuid::new_v4(),
                title: "The Name of the Wind".into(),
                summary: "Kvothe".into(),
                isbn: "9780756404079".into(),
                author_id: author.id,
                genre_id: genre.id,
            })
            .await
            .unwrap();

        match service.delete(author.id).await.unwrap() {
            DeleteOutcome::Blocked { books, .. } => {
                assert_eq!(books[0].title, "The Name of the Wind")
            }
            other => panic!("expected Blocked, got {:?}", other),
        }
        assert!(service.get(author.id).await.is_ok());

        let other = created(&service, form("Jim", "Butcher")).await;
        assert!(matches!(service.delete(other.id).await.unwrap(), DeleteOutcome::Deleted));
        assert!(matches!(service.get(other.id).await, Err(AppError::NotFound(_))));
    }
}
