//! Genre model and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, FormInput};

/// Genre document as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn from_form(id: Uuid, form: &GenreForm) -> Self {
        Self {
            id,
            name: form.name.clone(),
        }
    }

    /// Canonical link for this genre
    pub fn url(&self) -> String {
        format!("/genre/{}", self.id)
    }
}

/// Genre create/update form submission
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must contain at least 3 characters"
    ))]
    pub name: String,
}

impl FormInput for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn sanitized(self) -> Self {
        Self {
            name: validation::trim(self.name),
        }
    }
}

/// Delete confirmation form
#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        let form = GenreForm { name: "  Sf  ".into() }.sanitized();
        assert_eq!(form.name, "Sf");
        let errors = form.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Genre name must contain at least 3 characters");
    }

    #[test]
    fn test_valid_name() {
        let form = GenreForm { name: " Fantasy ".into() }.sanitized();
        assert!(form.errors().is_empty());
        let genre = Genre::from_form(Uuid::nil(), &form);
        assert_eq!(genre.name, "Fantasy");
        assert_eq!(genre.url(), "/genre/00000000-0000-0000-0000-000000000000");
    }
}
