//! Application state shared across handlers

use crate::ai::{LabelSource, MockLabelSource};
use crate::assistant::Assistant;
use crate::catalog::QueryEngine;
use super::rate_limit::RateLimit;
use crate::config::Settings;
use crate::models::{Artisan, Product};
use crate::store::{seed, InMemoryRepository, Repository};
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Product storage
    pub products: Arc<dyn Repository<Product>>,
    /// Artisan storage
    pub artisans: Arc<dyn Repository<Artisan>>,
    /// Catalog query engine
    pub engine: QueryEngine,
    /// Chat assistant
    pub assistant: Arc<Assistant>,
    /// Image labelling backend
    pub labels: Arc<dyn LabelSource>,
    /// Per-client request limiter, when enabled
    pub rate_limit: Option<RateLimit>,
}

impl AppState {
    /// Create state with in-memory repositories, seeded with the demo
    /// catalog when enabled
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let (products, artisans) = if settings.catalog.seed_demo_data {
            let products = seed::products()?;
            let artisans = seed::artisans()?;
            info!(
                "Seeded {} products and {} artisans",
                products.len(),
                artisans.len()
            );
            (products, artisans)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self::with_repositories(
            settings,
            Arc::new(InMemoryRepository::with_records(products)),
            Arc::new(InMemoryRepository::with_records(artisans)),
        ))
    }

    /// Create state around existing repositories
    pub fn with_repositories(
        settings: Settings,
        products: Arc<dyn Repository<Product>>,
        artisans: Arc<dyn Repository<Artisan>>,
    ) -> Self {
        let engine = QueryEngine::new(
            settings.catalog.product_page_size,
            settings.catalog.artisan_page_size,
        );
        let assistant = Arc::new(Assistant::from_settings(&settings.chat));
        let rate_limit = RateLimit::from_settings(&settings.server.rate_limit);

        Self {
            settings: Arc::new(settings),
            products,
            artisans,
            engine,
            assistant,
            labels: Arc::new(MockLabelSource),
            rate_limit,
        }
    }

    /// Replace the image labelling backend
    pub fn with_label_source(mut self, labels: Arc<dyn LabelSource>) -> Self {
        self.labels = labels;
        self
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
