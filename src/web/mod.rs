//! Web server module
//!
//! JSON API over the catalog, chat assistant and AI helpers.

mod error;
pub mod handlers;
mod rate_limit;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use rate_limit::RateLimit;
pub use routes::create_router;
pub use state::AppState;

#[cfg(test)]
mod tests;
