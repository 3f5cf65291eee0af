//! Artifind: a marketplace API connecting craft buyers with artisans
//!
//! The core is an in-memory catalog query engine (filter, sort, paginate)
//! over products and artisan profiles, served as a JSON API alongside a
//! keyword-driven shopping assistant and rule-based listing helpers.

pub mod ai;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod models;
pub mod store;
pub mod web;

pub use catalog::{QueryDescriptor, QueryEngine, QueryResult};
pub use config::Settings;
pub use models::{Artisan, Product};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
