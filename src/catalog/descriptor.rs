//! Query descriptors and their construction from request parameters

use super::record::RecordKind;
use super::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Parse a user-supplied direction; anything unrecognised is descending
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

/// One named constraint on a record field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Whole-value equality on a text field
    Equals {
        field: String,
        value: String,
        case_sensitive: bool,
    },
    /// Case-insensitive substring containment
    Contains { field: String, needle: String },
    /// Inclusive numeric bounds
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Exact boolean match
    Flag { field: String, value: bool },
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
            case_sensitive: false,
        }
    }

    pub fn id_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
            case_sensitive: true,
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn flag(field: impl Into<String>, value: bool) -> Self {
        Self::Flag {
            field: field.into(),
            value,
        }
    }

    /// Name of the field this filter reads
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. }
            | Self::Contains { field, .. }
            | Self::Range { field, .. }
            | Self::Flag { field, .. } => field,
        }
    }
}

/// A caller's search, filter, sort and page request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    /// Free-text search, matched case-insensitively
    pub search: Option<String>,
    /// Criteria a record must all satisfy
    pub filters: Vec<Filter>,
    /// Requested sort field (resolved per record kind)
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    /// Requested page, 1-indexed; coerced when out of range
    pub page: Option<i64>,
    /// Requested page size; coerced when out of range
    pub limit: Option<i64>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Lowercased search needle, or `None` when search is absent or blank
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Build a descriptor from query-string parameters.
    ///
    /// Every value is text here, so this only fails on inputs that would
    /// also fail as JSON.
    pub fn from_params(
        kind: RecordKind,
        params: &HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        let object: Map<String, Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Self::from_value(kind, &Value::Object(object))
    }

    /// Build a descriptor from an untyped JSON object.
    ///
    /// Filter keys may appear at the top level or inside a nested `filters`
    /// object. Unusable page, limit, range and flag values are dropped rather
    /// than rejected; a non-textual `search` is an error.
    pub fn from_value(kind: RecordKind, value: &Value) -> Result<Self, CatalogError> {
        let object = value.as_object().ok_or_else(|| {
            CatalogError::InvalidDescriptor("query must be a JSON object".to_string())
        })?;

        let mut params: HashMap<&str, &Value> =
            object.iter().map(|(k, v)| (k.as_str(), v)).collect();
        match object.get("filters") {
            None | Some(Value::Null) => {}
            Some(Value::Object(nested)) => {
                params.extend(nested.iter().map(|(k, v)| (k.as_str(), v)));
            }
            Some(_) => {
                return Err(CatalogError::InvalidDescriptor(
                    "`filters` must be an object".to_string(),
                ))
            }
        }

        let search = match params.get("search") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()).filter(|s| !s.trim().is_empty()),
            Some(_) => {
                return Err(CatalogError::InvalidDescriptor(
                    "`search` must be a string".to_string(),
                ))
            }
        };

        let mut descriptor = Self {
            search,
            ..Self::default()
        };

        descriptor.sort_field = first_text(&params, &["sortField", "sort"])?;
        if let Some(order) = first_text(&params, &["sortOrder", "order"])? {
            descriptor.sort_order = SortOrder::parse(&order);
        }
        descriptor.page = params.get("page").and_then(|v| coerce_integer("page", v));
        descriptor.limit = params.get("limit").and_then(|v| coerce_integer("limit", v));

        let mut bounds: Vec<(&str, Option<f64>, Option<f64>)> = Vec::new();
        for spec in filter_specs(kind) {
            let Some(raw) = params.get(spec.param) else {
                continue;
            };

            match spec.kind {
                ParamKind::Exact | ParamKind::ExactId | ParamKind::Contains => {
                    let Some(text) = coerce_text(spec.param, raw)? else {
                        continue;
                    };
                    descriptor.filters.push(match spec.kind {
                        ParamKind::Exact => Filter::equals(spec.field, text),
                        ParamKind::ExactId => Filter::id_equals(spec.field, text),
                        _ => Filter::contains(spec.field, text),
                    });
                }
                ParamKind::Min | ParamKind::Max => {
                    let Some(n) = coerce_number(spec.param, raw) else {
                        continue;
                    };
                    let idx = match bounds.iter().position(|(f, _, _)| *f == spec.field) {
                        Some(idx) => idx,
                        None => {
                            bounds.push((spec.field, None, None));
                            bounds.len() - 1
                        }
                    };
                    let slot = &mut bounds[idx];
                    if spec.kind == ParamKind::Min {
                        slot.1 = Some(n);
                    } else {
                        slot.2 = Some(n);
                    }
                }
                ParamKind::Flag => {
                    if let Some(flag) = coerce_flag(spec.param, raw) {
                        descriptor.filters.push(Filter::flag(spec.field, flag));
                    }
                }
            }
        }

        descriptor.filters.extend(
            bounds
                .into_iter()
                .map(|(field, min, max)| Filter::range(field, min, max)),
        );

        Ok(descriptor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Exact,
    ExactId,
    Contains,
    Min,
    Max,
    Flag,
}

/// Maps a request parameter onto a record field and comparison
struct FilterSpec {
    param: &'static str,
    field: &'static str,
    kind: ParamKind,
}

const fn spec(param: &'static str, field: &'static str, kind: ParamKind) -> FilterSpec {
    FilterSpec { param, field, kind }
}

const PRODUCT_FILTERS: &[FilterSpec] = &[
    spec("category", "category", ParamKind::Exact),
    spec("artisan", "artisanId", ParamKind::ExactId),
    spec("artisanId", "artisanId", ParamKind::ExactId),
    spec("status", "status", ParamKind::Exact),
    spec("location", "location", ParamKind::Contains),
    spec("minPrice", "price", ParamKind::Min),
    spec("maxPrice", "price", ParamKind::Max),
    spec("minRating", "rating", ParamKind::Min),
    spec("maxRating", "rating", ParamKind::Max),
    spec("inStock", "inStock", ParamKind::Flag),
    spec("featured", "featured", ParamKind::Flag),
];

const ARTISAN_FILTERS: &[FilterSpec] = &[
    spec("location", "location", ParamKind::Contains),
    spec("specialty", "specialty", ParamKind::Contains),
    spec("rating", "rating", ParamKind::Min),
    spec("minRating", "rating", ParamKind::Min),
    spec("maxRating", "rating", ParamKind::Max),
    spec("verified", "verified", ParamKind::Flag),
];

fn filter_specs(kind: RecordKind) -> &'static [FilterSpec] {
    match kind {
        RecordKind::Product => PRODUCT_FILTERS,
        RecordKind::Artisan => ARTISAN_FILTERS,
    }
}

fn first_text(
    params: &HashMap<&str, &Value>,
    names: &[&str],
) -> Result<Option<String>, CatalogError> {
    for name in names {
        if let Some(value) = params.get(name) {
            if let Some(text) = coerce_text(name, value)? {
                return Ok(Some(text));
            }
        }
    }
    Ok(None)
}

/// Scalars become text; blank strings count as absent
fn coerce_text(param: &str, value: &Value) -> Result<Option<String>, CatalogError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(CatalogError::InvalidDescriptor(format!(
            "`{}` must be a scalar value",
            param
        ))),
    }
}

fn coerce_number(param: &str, value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite());

    if n.is_none() && !value.is_null() {
        debug!("Ignoring non-numeric `{}` value: {}", param, value);
    }
    n
}

fn coerce_integer(param: &str, value: &Value) -> Option<i64> {
    coerce_number(param, value).map(|n| n.trunc() as i64)
}

fn coerce_flag(param: &str, value: &Value) -> Option<bool> {
    let flag = match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().and_then(|n| match n {
            1 => Some(true),
            0 => Some(false),
            _ => None,
        }),
        _ => None,
    };

    if flag.is_none() && !value.is_null() {
        debug!("Ignoring non-boolean `{}` value: {}", param, value);
    }
    flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params() {
        let d = QueryDescriptor::from_params(RecordKind::Product, &HashMap::new()).unwrap();
        assert_eq!(d, QueryDescriptor::default());
        assert_eq!(d.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_product_params() {
        let d = QueryDescriptor::from_params(
            RecordKind::Product,
            &params(&[
                ("search", "bowl"),
                ("category", "Pottery"),
                ("artisan", "1"),
                ("minPrice", "50"),
                ("maxPrice", "100"),
                ("inStock", "true"),
                ("sort", "price"),
                ("order", "asc"),
                ("page", "2"),
                ("limit", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(d.search.as_deref(), Some("bowl"));
        assert_eq!(d.sort_field.as_deref(), Some("price"));
        assert_eq!(d.sort_order, SortOrder::Ascending);
        assert_eq!(d.page, Some(2));
        assert_eq!(d.limit, Some(5));
        assert!(d.filters.contains(&Filter::equals("category", "Pottery")));
        assert!(d.filters.contains(&Filter::id_equals("artisanId", "1")));
        assert!(d.filters.contains(&Filter::flag("inStock", true)));
        assert!(d
            .filters
            .contains(&Filter::range("price", Some(50.0), Some(100.0))));
    }

    #[test]
    fn test_artisan_rating_is_minimum() {
        let d = QueryDescriptor::from_params(
            RecordKind::Artisan,
            &params(&[("rating", "4.8"), ("specialty", "glass")]),
        )
        .unwrap();
        assert!(d.filters.contains(&Filter::range("rating", Some(4.8), None)));
        assert!(d.filters.contains(&Filter::contains("specialty", "glass")));
    }

    #[test]
    fn test_unusable_values_are_dropped() {
        let d = QueryDescriptor::from_params(
            RecordKind::Product,
            &params(&[
                ("page", "abc"),
                ("limit", ""),
                ("minPrice", "cheap"),
                ("featured", "maybe"),
                ("category", "  "),
            ]),
        )
        .unwrap();
        assert_eq!(d.page, None);
        assert_eq!(d.limit, None);
        assert!(d.filters.is_empty());
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let d = QueryDescriptor::from_params(
            RecordKind::Artisan,
            &params(&[("category", "Pottery"), ("inStock", "true")]),
        )
        .unwrap();
        assert!(d.filters.is_empty());
    }

    #[test]
    fn test_json_nested_filters() {
        let d = QueryDescriptor::from_value(
            RecordKind::Product,
            &json!({
                "search": "vase",
                "sortField": "rating",
                "sortOrder": "ascending",
                "page": 1,
                "limit": 3,
                "filters": { "minPrice": 50, "featured": false }
            }),
        )
        .unwrap();
        assert_eq!(d.sort_order, SortOrder::Ascending);
        assert_eq!(d.limit, Some(3));
        assert!(d.filters.contains(&Filter::flag("featured", false)));
        assert!(d.filters.contains(&Filter::range("price", Some(50.0), None)));
    }

    #[test]
    fn test_non_text_search_is_invalid() {
        let err = QueryDescriptor::from_value(RecordKind::Product, &json!({ "search": 42 }))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDescriptor(_)));

        let err = QueryDescriptor::from_value(RecordKind::Product, &json!(["bowl"])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDescriptor(_)));

        let err = QueryDescriptor::from_value(RecordKind::Product, &json!({ "filters": [1] }))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Ascending);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Descending);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Descending);
    }

    #[test]
    fn test_search_needle() {
        assert_eq!(
            QueryDescriptor::new().with_search("  Bowl ").search_needle(),
            Some("bowl".to_string())
        );
        assert_eq!(QueryDescriptor::new().with_search("  ").search_needle(), None);
    }
}
