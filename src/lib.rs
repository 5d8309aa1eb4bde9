//! Local library catalog
//!
//! Server-rendered author and genre management over a catalog store,
//! refusing to delete anything books still reference.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::CatalogStore;
use services::Services;
use views::Views;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub views: Views,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, views: Views) -> Self {
        Self {
            services: Arc::new(Services::new(store)),
            views,
        }
    }
}
