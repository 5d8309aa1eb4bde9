//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, BookSummary, DeleteAuthorForm},
    services::{CreateOutcome, DeleteOutcome, UpdateOutcome},
    validation::FieldError,
    views::AuthorView,
    AppState,
};

const AUTHOR_LIST_URL: &str = "/authors";

/// List all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let mut context = Context::new();
    context.insert("title", "Author List");
    context.insert(
        "author_list",
        &authors.iter().map(AuthorView::from).collect::<Vec<_>>(),
    );
    state.views.render("author_list", &context)
}

/// Author page with their books
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.detail(id).await?;
    let mut context = Context::new();
    context.insert("title", "Author Detail");
    context.insert("author", &AuthorView::from(&author));
    context.insert("books", &books);
    state.views.render("author_detail", &context)
}

pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Author", None, &[])
}

pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form.clone()).await? {
        CreateOutcome::Created(author) | CreateOutcome::Existing(author) => {
            Ok(Redirect::to(&author.url()).into_response())
        }
        CreateOutcome::Invalid { entity, errors } => {
            let view = AuthorView::from(&entity).with_submitted(&form);
            Ok(render_form(&state, "Create Author", Some(view), &errors)?.into_response())
        }
    }
}

pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    render_form(&state, "Update Author", Some(AuthorView::from(&author)), &[])
}

pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, form.clone()).await? {
        UpdateOutcome::Updated(author) => Ok(Redirect::to(&author.url()).into_response()),
        UpdateOutcome::Invalid { entity, errors } => {
            let view = AuthorView::from(&entity).with_submitted(&form);
            Ok(render_form(&state, "Update Author", Some(view), &errors)?.into_response())
        }
    }
}

pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (author, books) = state.services.authors.detail(id).await?;
    render_delete(&state, &author, &books)
}

/// Delete the author named by the form, unless books still reference them
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    if form.authorid != id {
        return Err(AppError::BadRequest(format!(
            "Submitted author {} does not match {}",
            form.authorid, id
        )));
    }
    match state.services.authors.delete(form.authorid).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(AUTHOR_LIST_URL).into_response())
        }
        DeleteOutcome::Blocked { entity, books } => {
            Ok(render_delete(&state, &entity, &books)?.into_response())
        }
    }
}

fn render_form(
    state: &AppState,
    title: &str,
    author: Option<AuthorView>,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    if let Some(author) = author {
        context.insert("author", &author);
    }
    context.insert("errors", errors);
    state.views.render("author_form", &context)
}

fn render_delete(
    state: &AppState,
    author: &Author,
    books: &[BookSummary],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Delete Author");
    context.insert("author", &AuthorView::from(author));
    context.insert("books", books);
    state.views.render("author_delete", &context)
}
