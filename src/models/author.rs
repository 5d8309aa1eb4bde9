//! Author model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, FormInput};

/// Author document as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Build an author from a submitted form, keeping `id`.
    /// Unparseable dates are dropped; validation reports them separately.
    pub fn from_form(id: Uuid, form: &AuthorForm) -> Self {
        Self {
            id,
            first_name: form.first_name.clone(),
            family_name: form.family_name.clone(),
            date_of_birth: validation::non_blank(&form.date_of_birth)
                .and_then(validation::parse_iso8601_date),
            date_of_death: validation::non_blank(&form.date_of_death)
                .and_then(validation::parse_iso8601_date),
        }
    }

    /// Canonical link for this author
    pub fn url(&self) -> String {
        format!("/author/{}", self.id)
    }

    /// "Family, First"; empty unless both parts are known
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_long).unwrap_or_default();
        let death = self.date_of_death.map(format_long).unwrap_or_default();
        if birth.is_empty() && death.is_empty() {
            String::new()
        } else {
            format!("{} - {}", birth, death)
        }
    }
}

/// e.g. "Jan 3, 1892"
pub fn format_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Author create/update form submission
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "validation::first_name_chars")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "validation::family_name_chars")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validation::birth_date_iso8601"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "validation::death_date_iso8601"))]
    pub date_of_death: String,
}

impl FormInput for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn sanitized(self) -> Self {
        Self {
            first_name: validation::trim(self.first_name),
            family_name: validation::trim(self.family_name),
            date_of_birth: validation::trim(self.date_of_birth),
            date_of_death: validation::trim(self.date_of_death),
        }
    }
}

/// Delete confirmation form
#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, family: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            ..Default::default()
        }
        .sanitized()
    }

    #[test]
    fn test_name_and_url() {
        let id = Uuid::new_v4();
        let author = Author::from_form(id, &form(" Isaac ", "Asimov"));
        assert_eq!(author.name(), "Asimov, Isaac");
        assert_eq!(author.url(), format!("/author/{}", id));

        let unnamed = Author::from_form(id, &form("", "Asimov"));
        assert_eq!(unnamed.name(), "");
    }

    #[test]
    fn test_lifespan() {
        let mut f = form("Isaac", "Asimov");
        f.date_of_birth = "1920-01-02".into();
        f.date_of_death = "1992-04-06".into();
        let author = Author::from_form(Uuid::new_v4(), &f);
        assert_eq!(author.lifespan(), "Jan 2, 1920 - Apr 6, 1992");

        let living = Author::from_form(Uuid::new_v4(), &form("Ann", "Leckie"));
        assert_eq!(living.lifespan(), "");
    }

    #[test]
    fn test_errors_follow_field_order() {
        let mut f = form("John2!", "");
        f.date_of_death = "someday".into();
        let messages: Vec<_> = f.errors().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "First name has non-alphanumeric characters.",
                "Family name must be specified.",
                "Family name has non-alphanumeric characters.",
                "Invalid date of death",
            ]
        );
    }

    #[test]
    fn test_overlong_family_name_is_rejected() {
        let f = form("Ann", &"L".repeat(101));
        let errors = f.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "family_name");
        assert_eq!(errors[0].message, "Family name must not exceed 100 characters.");
    }

    #[test]
    fn test_invalid_date_is_dropped_from_candidate() {
        let mut f = form("Ann", "Leckie");
        f.date_of_birth = "not-a-date".into();
        assert!(Author::from_form(Uuid::new_v4(), &f).date_of_birth.is_none());
    }
}
