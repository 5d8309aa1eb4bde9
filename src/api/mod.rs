//! HTTP handlers and routing for the catalog

pub mod authors;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        // Genres
        .route("/genres", get(genres::genre_list))
        .route(
            "/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/genre/:id", get(genres::genre_detail))
        .route(
            "/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        .route(
            "/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
