//! Tag suggestions for product listings

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const BASE_TAGS: [&str; 5] = ["handcrafted", "artisan-made", "unique", "custom", "traditional"];
const TAG_CONFIDENCE: f64 = 0.85;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Listing details to suggest tags for
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSuggestion {
    pub tags: Vec<String>,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

/// Category name as a tag: lowercased with whitespace runs turned into `-`
pub fn category_slug(category: &str) -> String {
    WHITESPACE_RE
        .replace_all(&category.to_lowercase(), "-")
        .into_owned()
}

/// Base tags, then materials, then the category slug, without duplicates
pub fn suggest(request: &TagRequest) -> Result<TagSuggestion, ValidationError> {
    let has_text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has_text(&request.title) && !has_text(&request.description) {
        return Err(ValidationError::Missing("Title or description is required"));
    }

    let candidates = BASE_TAGS
        .iter()
        .map(|t| t.to_string())
        .chain(request.materials.iter().map(|m| m.to_lowercase()))
        .chain(
            request
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(category_slug),
        );

    let mut tags: Vec<String> = Vec::new();
    for tag in candidates {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Ok(TagSuggestion {
        tags,
        confidence: TAG_CONFIDENCE,
        generated_at: Utc::now(),
    })
}
