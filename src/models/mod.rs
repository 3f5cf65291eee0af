//! Marketplace records and the payloads that create or change them
//!
//! Validation and normalisation (trimmed text, lowercased tags, numeric
//! prices) happen here, before anything reaches a repository.

mod artisan;
pub mod lenient;
pub mod price;
mod product;

pub use artisan::{Artisan, ArtisanUpdate, NewArtisan, Rating};
pub use product::{NewProduct, Product, ProductUpdate};

/// Rejected create or update payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    Missing(&'static str),
    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0}")]
    Invalid(String),
}

/// Trimmed value, or `None` when absent or blank
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

/// Trim, lowercase and drop empty tags, keeping first occurrences
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
