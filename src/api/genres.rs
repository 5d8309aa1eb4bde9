//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{BookSummary, DeleteGenreForm, Genre, GenreForm},
    services::{CreateOutcome, DeleteOutcome, UpdateOutcome},
    validation::FieldError,
    views::GenreView,
    AppState,
};

const GENRE_LIST_URL: &str = "/genres";

/// List all genres
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    let mut context = Context::new();
    context.insert("title", "Genre List");
    context.insert(
        "genre_list",
        &genres.iter().map(GenreView::from).collect::<Vec<_>>(),
    );
    state.views.render("genre_list", &context)
}

/// Genre page with its books
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.genres.detail(id).await?;
    let mut context = Context::new();
    context.insert("title", "Genre Detail");
    context.insert("genre", &GenreView::from(&genre));
    context.insert("books", &books);
    state.views.render("genre_detail", &context)
}

pub async fn genre_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Genre", None, &[])
}

pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        CreateOutcome::Created(genre) | CreateOutcome::Existing(genre) => {
            Ok(Redirect::to(&genre.url()).into_response())
        }
        CreateOutcome::Invalid { entity, errors } => {
            Ok(render_form(&state, "Create Genre", Some(&entity), &errors)?.into_response())
        }
    }
}

pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(id).await?;
    render_form(&state, "Update Genre", Some(&genre), &[])
}

pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, form).await? {
        UpdateOutcome::Updated(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        UpdateOutcome::Invalid { entity, errors } => {
            Ok(render_form(&state, "Update Genre", Some(&entity), &errors)?.into_response())
        }
    }
}

pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.genres.detail(id).await?;
    render_delete(&state, &genre, &books)
}

/// Delete the genre named by the form, unless books are still filed under it
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    if form.genreid != id {
        return Err(AppError::BadRequest(format!(
            "Submitted genre {} does not match {}",
            form.genreid, id
        )));
    }
    match state.services.genres.delete(form.genreid).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(GENRE_LIST_URL).into_response())
        }
        DeleteOutcome::Blocked { entity, books } => {
            Ok(render_delete(&state, &entity, &books)?.into_response())
        }
    }
}

fn render_form(
    state: &AppState,
    title: &str,
    genre: Option<&Genre>,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    if let Some(genre) = genre {
        context.insert("genre", &GenreView::from(genre));
    }
    context.insert("errors", errors);
    state.views.render("genre_form", &context)
}

fn render_delete(
    state: &AppState,
    genre: &Genre,
    books: &[BookSummary],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Delete Genre");
    context.insert("genre", &GenreView::from(genre));
    context.insert("books", books);
    state.views.render("genre_delete", &context)
}
