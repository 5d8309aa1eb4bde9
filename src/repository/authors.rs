//! Author domain methods on Repository

use uuid::Uuid;

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::Author,
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

impl Repository {
    /// List all authors ordered by family name
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY family_name, first_name"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Find an author by its (first name, family name) pair
    pub async fn authors_find_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE first_name = $1 AND family_name = $2"
        ))
        .bind(first_name)
        .bind(family_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert an author; the (first_name, family_name) unique index guards duplicates
    pub async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {AUTHOR_COLUMNS}
            "#
        ))
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(
                e,
                format!("Author {} {} already exists", author.first_name, author.family_name),
            )
        })
    }

    /// Overwrite an author's fields
    pub async fn authors_update(&self, author: &Author) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {AUTHOR_COLUMNS}
            "#
        ))
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            unique_violation(
                e,
                format!("Author {} {} already exists", author.first_name, author.family_name),
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", author.id)))
    }

    /// Delete an author
    pub async fn authors_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
