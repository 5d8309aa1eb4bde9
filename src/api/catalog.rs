//! Catalog home page

use axum::{extract::State, response::Html};
use tera::Context;

use crate::{error::AppResult, AppState};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    let mut context = Context::new();
    context.insert("title", "Local Library Home");
    context.insert("counts", &counts);
    state.views.render("index", &context)
}
