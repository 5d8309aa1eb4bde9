//! Genre domain methods on Repository

use uuid::Uuid;

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::Genre,
};

impl Repository {
    /// List all genres in insertion order
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get genre by ID
    pub async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find a genre by exact name
    pub async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a genre; the name unique index guards duplicates
    pub async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(genre.id)
        .bind(&genre.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, format!("Genre {} already exists", genre.name)))
    }

    /// Overwrite a genre's name
    pub async fn genres_update(&self, genre: &Genre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(genre.id)
            .bind(&genre.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_violation(e, format!("Genre {} already exists", genre.name)))?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", genre.id)))
    }

    /// Delete a genre
    pub async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre {} not found", id)));
        }
        Ok(())
    }
}
