//! Query expansion for catalog search

use crate::models::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terms added when a query mentions a keyword
struct Expansion {
    keyword: &'static str,
    synonyms: &'static [&'static str],
    related: &'static [&'static str],
    categories: &'static [&'static str],
}

const EXPANSIONS: &[Expansion] = &[
    Expansion {
        keyword: "bowl",
        synonyms: &["dish", "vessel", "container"],
        related: &["ceramic", "pottery", "kitchenware"],
        categories: &["Pottery", "Ceramics", "Kitchenware"],
    },
    Expansion {
        keyword: "wood",
        synonyms: &["timber", "lumber"],
        related: &["carved", "furniture", "sculpture"],
        categories: &["Woodwork", "Furniture", "Sculptures"],
    },
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

/// A search query with related vocabulary attached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedQuery {
    pub original_query: String,
    pub synonyms: Vec<String>,
    pub related_terms: Vec<String>,
    pub categories: Vec<String>,
    pub suggested_filters: Map<String, Value>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// Expand a query using the first keyword rule it mentions
pub fn enhance(request: &SearchRequest) -> Result<EnhancedQuery, ValidationError> {
    let query = request
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or(ValidationError::Missing("Search query is required"))?;

    let lower = query.to_lowercase();
    let mut enhanced = EnhancedQuery {
        original_query: query.to_string(),
        synonyms: Vec::new(),
        related_terms: Vec::new(),
        categories: Vec::new(),
        suggested_filters: Map::new(),
    };

    if let Some(rule) = EXPANSIONS.iter().find(|e| lower.contains(e.keyword)) {
        enhanced.synonyms = owned(rule.synonyms);
        enhanced.related_terms = owned(rule.related);
        enhanced.categories = owned(rule.categories);
    }

    Ok(enhanced)
}
