//! Catalog-wide queries

use std::sync::Arc;

use crate::{error::AppResult, models::CatalogCounts, repository::CatalogStore};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        self.store.counts().await
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
