//! Server-side rendering with Tera

use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{author::format_long, Author, AuthorForm, Genre},
};

/// Compiled template set; templates are addressed without the `.html` suffix.
#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    /// Load every `*.html` file under `dir`
    pub fn from_dir(dir: &str) -> AppResult<Self> {
        let pattern = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let tera = Tera::new(&pattern)?;
        tracing::debug!("Loaded {} template(s) from {}", tera.get_template_names().count(), dir);
        Ok(Self { tera: Arc::new(tera) })
    }

    pub fn render(&self, template: &str, context: &Context) -> AppResult<Html<String>> {
        let body = self.tera.render(&format!("{}.html", template), context)?;
        Ok(Html(body))
    }
}

/// Author as templates see it, with derived fields resolved
#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub first_name: String,
    pub family_name: String,
    pub lifespan: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    /// `yyyy-mm-dd`, for `<input type="date">`
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        let iso = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };
        Self {
            id: author.id,
            url: author.url(),
            name: author.name(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            lifespan: author.lifespan(),
            date_of_birth: author.date_of_birth.map(format_long).unwrap_or_default(),
            date_of_death: author.date_of_death.map(format_long).unwrap_or_default(),
            date_of_birth_yyyy_mm_dd: iso(author.date_of_birth),
            date_of_death_yyyy_mm_dd: iso(author.date_of_death),
        }
    }
}

impl AuthorView {
    /// Show the dates as typed. An unparseable date is absent on the
    /// candidate, but the form should still echo it back.
    pub fn with_submitted(mut self, form: &AuthorForm) -> Self {
        self.date_of_birth_yyyy_mm_dd = form.date_of_birth.trim().to_string();
        self.date_of_death_yyyy_mm_dd = form.date_of_death.trim().to_string();
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GenreView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            url: genre.url(),
            name: genre.name.clone(),
        }
    }
}
